//! Graphics context capabilities required by the shader manager.

use std::fmt;

/// Programmable stage of a shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Driver primitives used to compile, link, bind and feed shader programs.
///
/// Every call is synchronous and must happen on the thread owning the rendering context.
/// Uniform setters receive `None` for a location that could not be resolved and must
/// treat it as a no-op, like OpenGL does for location `-1`.
pub trait GraphicsContext {
    /// Handle to a shader stage object.
    type Stage: Copy + fmt::Debug;
    /// Handle to a program object.
    type Program: Copy + fmt::Debug;
    /// Resolved location of a uniform variable.
    type UniformLocation: fmt::Debug;

    /// Allocate a new stage object.
    fn create_stage(&self, kind: StageKind) -> Result<Self::Stage, String>;
    /// Replace the source code of a stage.
    fn stage_source(&self, stage: Self::Stage, source: &str);
    /// Compile a stage from its current source.
    fn compile_stage(&self, stage: Self::Stage);
    /// Whether the last compilation of the stage succeeded.
    fn stage_compile_status(&self, stage: Self::Stage) -> bool;
    /// Compiler output of the stage.
    fn stage_info_log(&self, stage: Self::Stage) -> String;
    /// Release a stage object.
    fn delete_stage(&self, stage: Self::Stage);

    /// Allocate a new program object.
    fn create_program(&self) -> Result<Self::Program, String>;
    /// Attach a stage to a program.
    fn attach_stage(&self, program: Self::Program, stage: Self::Stage);
    /// Link all stages attached to a program.
    fn link_program(&self, program: Self::Program);
    /// Check whether a program can execute in the current pipeline state.
    fn validate_program(&self, program: Self::Program);
    /// Whether the last link of the program succeeded.
    fn program_link_status(&self, program: Self::Program) -> bool;
    /// Whether the last validation of the program succeeded.
    fn program_validate_status(&self, program: Self::Program) -> bool;
    /// Linker and validator output of the program.
    fn program_info_log(&self, program: Self::Program) -> String;
    /// Release a program object.
    fn delete_program(&self, program: Self::Program);

    /// Install a program on the pipeline, or the default pipeline for `None`.
    fn use_program(&self, program: Option<Self::Program>);

    /// Resolve a uniform variable of a linked program.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    /// Set a `float` uniform.
    fn uniform_1_f32(&self, location: Option<&Self::UniformLocation>, x: f32);
    /// Set an `int` uniform.
    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, x: i32);
    /// Set a `vec2` uniform.
    fn uniform_2_f32(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);
    /// Set a `vec3` uniform.
    fn uniform_3_f32(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32, z: f32);
    /// Set a `vec4` uniform.
    fn uniform_4_f32(
        &self,
        location: Option<&Self::UniformLocation>,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    );
    /// Set a `float[]` uniform.
    fn uniform_1_f32_slice(&self, location: Option<&Self::UniformLocation>, values: &[f32]);
    /// Set an `int[]` uniform.
    fn uniform_1_i32_slice(&self, location: Option<&Self::UniformLocation>, values: &[i32]);
}
