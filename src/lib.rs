//! GPU shader program management.
//!
//! Programs are compiled and linked from vertex/fragment source text, registered by name in a
//! [`Registry`], bound to the rendering pipeline and fed uniform values. The registry talks to
//! the driver through a [`GraphicsContext`]; an OpenGL implementation built on `glow` is
//! provided as [`GlContext`].
//!
//! ```no_run
//! use cgmath::Vector3;
//! use rwshader::shader::builtin;
//! use rwshader::{GlContext, Registry};
//!
//! fn draw_frame(registry: &mut Registry<GlContext>, light: &Vector3<f32>) {
//!     registry.set_active_shader(builtin::HEMISPHERE_KEY);
//!     registry.bind_active();
//!     if let Err(e) = registry.set_uniform_vec3(builtin::LIGHT_POSITION_UNIFORM, Some(light)) {
//!         log::warn!("{e}");
//!     }
//!     // Draw calls go here.
//!     registry.unbind();
//! }
//! ```

pub mod binding;
pub mod context;
pub mod error;
pub mod gl;
pub mod registry;
pub mod shader;
pub mod uniform;

#[cfg(test)]
mod mock;

pub use binding::ActiveBinding;
pub use context::{GraphicsContext, StageKind};
pub use error::{ContextCreationError, ShaderBuildError, UniformError};
pub use gl::GlContext;
pub use registry::Registry;
pub use shader::{build_program, ShaderDescriptor, ShaderProgram};
pub use uniform::UniformBuffer;
