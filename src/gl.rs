//! OpenGL implementation of the graphics context, backed by `glow`.

use std::ffi::c_void;

use glow::HasContext;

use crate::context::{GraphicsContext, StageKind};
use crate::error::ContextCreationError;

impl From<StageKind> for u32 {
    fn from(kind: StageKind) -> Self {
        match kind {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// `glValidateProgram`.
type ValidateProgramFn = unsafe extern "system" fn(program: u32);
/// `glGetProgramiv`.
type GetProgramivFn = unsafe extern "system" fn(program: u32, pname: u32, params: *mut i32);

/// Program validation entry points, which `glow` does not expose.
#[derive(Debug, Copy, Clone)]
pub(crate) struct ValidationFns {
    validate_program: ValidateProgramFn,
    get_programiv: GetProgramivFn,
}

impl ValidationFns {
    /// Resolve the entry points through a GL loader function.
    ///
    /// # Safety
    /// The loader must return either null or a pointer to the named GL function.
    pub(crate) unsafe fn load<F>(mut loader: F) -> Result<Self, ContextCreationError>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let validate_program = loader("glValidateProgram");
        if validate_program.is_null() {
            return Err(ContextCreationError::MissingFunction("glValidateProgram"));
        }
        let get_programiv = loader("glGetProgramiv");
        if get_programiv.is_null() {
            return Err(ContextCreationError::MissingFunction("glGetProgramiv"));
        }

        Ok(Self {
            validate_program: std::mem::transmute::<*const c_void, ValidateProgramFn>(
                validate_program,
            ),
            get_programiv: std::mem::transmute::<*const c_void, GetProgramivFn>(get_programiv),
        })
    }

    /// Run program validation.
    pub(crate) fn validate(&self, program: u32) {
        unsafe { (self.validate_program)(program) }
    }

    /// Read `GL_VALIDATE_STATUS` of a program.
    pub(crate) fn validate_status(&self, program: u32) -> bool {
        let mut status = 0;
        unsafe { (self.get_programiv)(program, glow::VALIDATE_STATUS, &mut status) };
        status != 0
    }
}

/// OpenGL context.
///
/// Wraps a `glow::Context` together with the validation entry points loaded from the same
/// loader function.
pub struct GlContext {
    /// Context used for every call `glow` provides.
    gl: glow::Context,
    /// Program validation functions.
    validation: ValidationFns,
}

impl GlContext {
    /// Create a context from a GL loader function (e.g. `glutin`'s `get_proc_address`).
    ///
    /// # Safety
    /// A GL context must be current on the calling thread, and the loader must return either
    /// null or a pointer to the named function of that context.
    pub unsafe fn from_loader_function<F>(mut loader: F) -> Result<Self, ContextCreationError>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let validation = ValidationFns::load(&mut loader)?;
        let gl = glow::Context::from_loader_function(&mut loader);
        log::debug!("Created OpenGL context: {:?}.", gl.version());

        Ok(Self { gl, validation })
    }

    /// Get the underlying `glow` context, for draw calls.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

// Safety: every call below is a plain GL entry point taking handles that were created by
// the same context. Callers stay on the thread owning the context.
impl GraphicsContext for GlContext {
    type Stage = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_stage(&self, kind: StageKind) -> Result<Self::Stage, String> {
        unsafe { self.gl.create_shader(kind.into()) }
    }

    fn stage_source(&self, stage: Self::Stage, source: &str) {
        unsafe { self.gl.shader_source(stage, source) }
    }

    fn compile_stage(&self, stage: Self::Stage) {
        unsafe { self.gl.compile_shader(stage) }
    }

    fn stage_compile_status(&self, stage: Self::Stage) -> bool {
        unsafe { self.gl.get_shader_compile_status(stage) }
    }

    fn stage_info_log(&self, stage: Self::Stage) -> String {
        unsafe { self.gl.get_shader_info_log(stage) }
    }

    fn delete_stage(&self, stage: Self::Stage) {
        unsafe { self.gl.delete_shader(stage) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_stage(&self, program: Self::Program, stage: Self::Stage) {
        unsafe { self.gl.attach_shader(program, stage) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn validate_program(&self, program: Self::Program) {
        self.validation.validate(program.0.get());
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_validate_status(&self, program: Self::Program) -> bool {
        self.validation.validate_status(program.0.get())
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_1_f32(&self, location: Option<&Self::UniformLocation>, x: f32) {
        unsafe { self.gl.uniform_1_f32(location, x) }
    }

    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, x: i32) {
        unsafe { self.gl.uniform_1_i32(location, x) }
    }

    fn uniform_2_f32(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32) {
        unsafe { self.gl.uniform_2_f32(location, x, y) }
    }

    fn uniform_3_f32(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32, z: f32) {
        unsafe { self.gl.uniform_3_f32(location, x, y, z) }
    }

    fn uniform_4_f32(
        &self,
        location: Option<&Self::UniformLocation>,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) {
        unsafe { self.gl.uniform_4_f32(location, x, y, z, w) }
    }

    fn uniform_1_f32_slice(&self, location: Option<&Self::UniformLocation>, values: &[f32]) {
        unsafe { self.gl.uniform_1_f32_slice(location, values) }
    }

    fn uniform_1_i32_slice(&self, location: Option<&Self::UniformLocation>, values: &[i32]) {
        unsafe { self.gl.uniform_1_i32_slice(location, values) }
    }
}
