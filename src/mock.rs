//! Recording graphics context used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::context::{GraphicsContext, StageKind};

/// Source text that makes a mock stage fail to compile.
pub const BROKEN_SOURCE: &str = "#error broken";

/// Driver call observed by the mock context.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateStage(StageKind, u32),
    CompileStage(u32),
    DeleteStage(u32),
    CreateProgram(u32),
    AttachStage(u32, u32),
    LinkProgram(u32),
    ValidateProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    Uniform1f(Option<u32>, f32),
    Uniform1i(Option<u32>, i32),
    Uniform2f(Option<u32>, [f32; 2]),
    Uniform3f(Option<u32>, [f32; 3]),
    Uniform4f(Option<u32>, [f32; 4]),
    Uniform1fv(Option<u32>, Vec<f32>),
    Uniform1iv(Option<u32>, Vec<i32>),
}

impl Call {
    /// Whether the call changes pipeline or uniform state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::UseProgram(_)
                | Self::Uniform1f(..)
                | Self::Uniform1i(..)
                | Self::Uniform2f(..)
                | Self::Uniform3f(..)
                | Self::Uniform4f(..)
                | Self::Uniform1fv(..)
                | Self::Uniform1iv(..)
        )
    }
}

/// Scripted driver: a stage fails to compile when its source contains [`BROKEN_SOURCE`],
/// a program fails to link when the vertex source contains `link_error`.
#[derive(Default)]
pub struct MockContext {
    next_handle: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    uniforms: RefCell<HashSet<String>>,
    refuse_allocation: Cell<bool>,
    refused_attempt: Cell<Option<u32>>,
    attempts: Cell<u32>,
    calls: RefCell<Vec<Call>>,
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given uniform names resolvable on every program.
    pub fn with_uniforms(names: &[&str]) -> Self {
        let ctx = Self::default();
        ctx.uniforms
            .borrow_mut()
            .extend(names.iter().map(|name| name.to_string()));
        ctx
    }

    pub fn refuse_allocation(&self, refuse: bool) {
        self.refuse_allocation.set(refuse);
    }

    /// Refuse only the `attempt`-th allocation, counting from 1.
    pub fn refuse_allocation_at(&self, attempt: u32) {
        self.refused_attempt.set(Some(attempt));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn deleted_programs(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteProgram(program) => Some(*program),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_stages(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteStage(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn refuses_allocation(&self) -> bool {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);
        self.refuse_allocation.get() || self.refused_attempt.get() == Some(attempt)
    }

    fn allocate(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }

    fn source_of(&self, stage: u32) -> String {
        self.sources
            .borrow()
            .get(&stage)
            .cloned()
            .unwrap_or_default()
    }
}

impl GraphicsContext for MockContext {
    type Stage = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn create_stage(&self, kind: StageKind) -> Result<u32, String> {
        if self.refuses_allocation() {
            return Err("out of memory".to_owned());
        }
        let stage = self.allocate();
        self.record(Call::CreateStage(kind, stage));
        Ok(stage)
    }

    fn stage_source(&self, stage: u32, source: &str) {
        self.sources.borrow_mut().insert(stage, source.to_owned());
    }

    fn compile_stage(&self, stage: u32) {
        self.record(Call::CompileStage(stage));
    }

    fn stage_compile_status(&self, stage: u32) -> bool {
        !self.source_of(stage).contains(BROKEN_SOURCE)
    }

    fn stage_info_log(&self, stage: u32) -> String {
        if self.stage_compile_status(stage) {
            String::new()
        } else {
            format!("0:1(1): error: stage {stage} is broken\n")
        }
    }

    fn delete_stage(&self, stage: u32) {
        self.record(Call::DeleteStage(stage));
    }

    fn create_program(&self) -> Result<u32, String> {
        if self.refuses_allocation() {
            return Err("out of memory".to_owned());
        }
        let program = self.allocate();
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    fn attach_stage(&self, program: u32, stage: u32) {
        self.attached
            .borrow_mut()
            .entry(program)
            .or_default()
            .push(stage);
        self.record(Call::AttachStage(program, stage));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn validate_program(&self, program: u32) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        let attached = self.attached.borrow();
        let stages = attached.get(&program).map(Vec::as_slice).unwrap_or(&[]);
        stages.len() == 2
            && stages.iter().all(|&stage| {
                let source = self.source_of(stage);
                !source.contains(BROKEN_SOURCE) && !source.contains("link_error")
            })
    }

    fn program_validate_status(&self, program: u32) -> bool {
        let attached = self.attached.borrow();
        attached
            .get(&program)
            .map(|stages| {
                stages
                    .iter()
                    .all(|&stage| !self.source_of(stage).contains("validate_error"))
            })
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) && self.program_validate_status(program) {
            String::new()
        } else {
            format!("error: program {program} failed to link\n")
        }
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        if !self.uniforms.borrow().contains(name) {
            return None;
        }
        // Stable per (program, name) pair.
        let offset = name.bytes().map(u32::from).sum::<u32>();
        Some(program * 1000 + offset)
    }

    fn uniform_1_f32(&self, location: Option<&u32>, x: f32) {
        self.record(Call::Uniform1f(location.copied(), x));
    }

    fn uniform_1_i32(&self, location: Option<&u32>, x: i32) {
        self.record(Call::Uniform1i(location.copied(), x));
    }

    fn uniform_2_f32(&self, location: Option<&u32>, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.copied(), [x, y]));
    }

    fn uniform_3_f32(&self, location: Option<&u32>, x: f32, y: f32, z: f32) {
        self.record(Call::Uniform3f(location.copied(), [x, y, z]));
    }

    fn uniform_4_f32(&self, location: Option<&u32>, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4f(location.copied(), [x, y, z, w]));
    }

    fn uniform_1_f32_slice(&self, location: Option<&u32>, values: &[f32]) {
        self.record(Call::Uniform1fv(location.copied(), values.to_vec()));
    }

    fn uniform_1_i32_slice(&self, location: Option<&u32>, values: &[i32]) {
        self.record(Call::Uniform1iv(location.copied(), values.to_vec()));
    }
}

/// Route crate logs to the test harness output.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
