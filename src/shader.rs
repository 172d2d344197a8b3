//! Compilation and linking of GPU shader programs.

pub mod builtin;

use std::fmt;

use crate::context::{GraphicsContext, StageKind};
use crate::error::ShaderBuildError;

/// Data required for creating a GPU shader program.
#[derive(Debug, Copy, Clone)]
pub struct ShaderDescriptor<'a> {
    /// Source code for the vertex shader.
    pub vertex_shader: &'a str,
    /// Source code for the fragment shader.
    pub fragment_shader: &'a str,
}

/// Shader stage after a compilation attempt.
#[derive(Debug)]
pub struct CompiledStage<S> {
    /// Driver handle of the stage.
    handle: S,
    /// Vertex or fragment.
    kind: StageKind,
    /// Compile status reported by the driver.
    compiled: bool,
    /// Compiler output.
    log: String,
}

impl<S: Copy> CompiledStage<S> {
    /// Get the driver handle of the stage.
    pub fn handle(&self) -> S {
        self.handle
    }

    /// Get the stage kind.
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// True if the driver compiled the stage successfully.
    pub fn compiled(&self) -> bool {
        self.compiled
    }

    /// Get the compiler output for the stage.
    pub fn log(&self) -> &str {
        &self.log
    }
}

/// Compile a single shader stage.
///
/// A stage that fails to compile is still returned, with its status flag unset; the caller
/// owns the handle either way. Only a failure to allocate the stage object is an error.
pub fn compile_stage<C: GraphicsContext + ?Sized>(
    ctx: &C,
    kind: StageKind,
    source: &str,
) -> Result<CompiledStage<C::Stage>, ShaderBuildError> {
    let handle = ctx
        .create_stage(kind)
        .map_err(|reason| ShaderBuildError::Allocation {
            object: "shader stage",
            reason,
        })?;

    ctx.stage_source(handle, source);
    ctx.compile_stage(handle);
    let compiled = ctx.stage_compile_status(handle);
    let log = ctx.stage_info_log(handle);
    log::trace!("Compiled {kind} stage {handle:?}: success={compiled}.");

    Ok(CompiledStage {
        handle,
        kind,
        compiled,
        log,
    })
}

/// Result of a link attempt.
#[derive(Debug)]
pub struct LinkedProgram<P> {
    /// Driver handle of the program.
    pub handle: P,
    /// Link and validation status, folded together.
    pub linked: bool,
    /// Linker and validator output.
    pub log: String,
}

/// Attach two compiled stages to a new program, then link and validate it.
pub fn link_program<C: GraphicsContext + ?Sized>(
    ctx: &C,
    vertex: &CompiledStage<C::Stage>,
    fragment: &CompiledStage<C::Stage>,
) -> Result<LinkedProgram<C::Program>, ShaderBuildError> {
    let handle = ctx
        .create_program()
        .map_err(|reason| ShaderBuildError::Allocation {
            object: "shader program",
            reason,
        })?;

    ctx.attach_stage(handle, vertex.handle);
    ctx.attach_stage(handle, fragment.handle);
    ctx.link_program(handle);
    ctx.validate_program(handle);
    let linked = ctx.program_link_status(handle) && ctx.program_validate_status(handle);
    let log = ctx.program_info_log(handle);
    log::trace!("Linked program {handle:?}: success={linked}.");

    Ok(LinkedProgram {
        handle,
        linked,
        log,
    })
}

/// GPU shader program.
///
/// Built in one step by [`build_program`] and never modified afterwards. The default
/// pipeline is represented by a program without handles whose status flags are all set.
pub struct ShaderProgram<C: GraphicsContext + ?Sized> {
    /// Program handle, `None` for the default pipeline.
    handle: Option<C::Program>,
    /// Vertex stage.
    vertex: Option<CompiledStage<C::Stage>>,
    /// Fragment stage.
    fragment: Option<CompiledStage<C::Stage>>,
    /// Vertex source, kept for diagnostics.
    vertex_source: String,
    /// Fragment source, kept for diagnostics.
    fragment_source: String,
    /// Link status.
    linked: bool,
}

impl<C: GraphicsContext + ?Sized> ShaderProgram<C> {
    /// Create the value standing for the native default pipeline.
    pub fn default_pipeline() -> Self {
        Self {
            handle: None,
            vertex: None,
            fragment: None,
            vertex_source: String::new(),
            fragment_source: String::new(),
            linked: true,
        }
    }

    /// Get the program handle. `None` selects the default pipeline.
    pub fn handle(&self) -> Option<C::Program> {
        self.handle
    }

    /// Get the vertex stage, if any.
    pub fn vertex_stage(&self) -> Option<&CompiledStage<C::Stage>> {
        self.vertex.as_ref()
    }

    /// Get the fragment stage, if any.
    pub fn fragment_stage(&self) -> Option<&CompiledStage<C::Stage>> {
        self.fragment.as_ref()
    }

    /// Get the vertex shader source code.
    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    /// Get the fragment shader source code.
    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// True if the vertex stage compiled.
    pub fn vertex_compiled(&self) -> bool {
        self.vertex.as_ref().map_or(true, CompiledStage::compiled)
    }

    /// True if the fragment stage compiled.
    pub fn fragment_compiled(&self) -> bool {
        self.fragment.as_ref().map_or(true, CompiledStage::compiled)
    }

    /// True if the program linked and validated.
    pub fn linked(&self) -> bool {
        self.linked
    }

    /// True if both stages compiled and the program linked.
    pub fn is_usable(&self) -> bool {
        self.vertex_compiled() && self.fragment_compiled() && self.linked
    }

    /// True for the default pipeline.
    pub fn is_default(&self) -> bool {
        self.handle.is_none()
    }

    /// Install the program on the pipeline.
    pub fn bind(&self, ctx: &C) {
        ctx.use_program(self.handle);
    }

    /// Release the driver objects owned by the program.
    pub fn release(self, ctx: &C) {
        if let Some(handle) = self.handle {
            ctx.delete_program(handle);
        }
        for stage in [self.vertex, self.fragment].into_iter().flatten() {
            ctx.delete_stage(stage.handle);
        }
    }

    /// First failure of the program, checked in build order.
    fn failure(&self) -> Option<ShaderBuildError> {
        let stages = [self.vertex.as_ref(), self.fragment.as_ref()];
        if let Some(stage) = stages.into_iter().flatten().find(|stage| !stage.compiled) {
            return Some(ShaderBuildError::Compile {
                stage: stage.kind,
                log: stage.log.clone(),
            });
        }
        None
    }
}

impl<C: GraphicsContext + ?Sized> fmt::Debug for ShaderProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .field("linked", &self.linked)
            .finish()
    }
}

/// Compile both stages and link them into a program.
///
/// Either a fully working program is returned or nothing is: on failure every driver object
/// created along the way is released and the first failure is reported, vertex stage first.
pub fn build_program<C: GraphicsContext + ?Sized>(
    ctx: &C,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<C>, ShaderBuildError> {
    let vertex = compile_stage(ctx, StageKind::Vertex, vertex_source)?;
    let fragment = match compile_stage(ctx, StageKind::Fragment, fragment_source) {
        Ok(fragment) => fragment,
        Err(e) => {
            ctx.delete_stage(vertex.handle);
            return Err(e);
        }
    };
    let linked = match link_program(ctx, &vertex, &fragment) {
        Ok(linked) => linked,
        Err(e) => {
            ctx.delete_stage(vertex.handle);
            ctx.delete_stage(fragment.handle);
            return Err(e);
        }
    };

    let program = ShaderProgram {
        handle: Some(linked.handle),
        vertex: Some(vertex),
        fragment: Some(fragment),
        vertex_source: vertex_source.to_owned(),
        fragment_source: fragment_source.to_owned(),
        linked: linked.linked,
    };

    let failure = program.failure().or_else(|| {
        (!program.linked).then(|| ShaderBuildError::Link {
            log: linked.log.clone(),
        })
    });
    match failure {
        Some(e) => {
            program.release(ctx);
            Err(e)
        }
        None => Ok(program),
    }
}
