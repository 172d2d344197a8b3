//! Shaders shipped with the library.

use crate::shader::ShaderDescriptor;

/// Registry key conventionally used for [`HEMISPHERE`].
pub const HEMISPHERE_KEY: &str = "hemi";

/// Name of the light position uniform (`vec3`) read by [`HEMISPHERE`].
pub const LIGHT_POSITION_UNIFORM: &str = "lightPos";

/// Hemisphere lighting around a single light position.
pub const HEMISPHERE: ShaderDescriptor<'static> = ShaderDescriptor {
    vertex_shader: include_str!("hemisphere.vert"),
    fragment_shader: include_str!("basic.frag"),
};
