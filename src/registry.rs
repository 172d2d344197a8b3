//! Named collection of shader programs and pipeline binding.

use std::collections::HashMap;

use crate::binding::ActiveBinding;
use crate::context::GraphicsContext;
use crate::error::ShaderBuildError;
use crate::shader::{build_program, ShaderDescriptor, ShaderProgram};

/// Registry entry.
enum Slot<C: GraphicsContext> {
    /// Successfully built program.
    Program(ShaderProgram<C>),
    /// The build under this key failed, lookups resolve to the default pipeline.
    Fallback,
}

/// Shader programs registered by name, together with the program in effect on the pipeline.
///
/// Owns the graphics context it builds programs with and releases every program it holds
/// when dropped.
pub struct Registry<C: GraphicsContext> {
    /// Context used for every driver call.
    context: C,
    /// Registered programs.
    programs: HashMap<String, Slot<C>>,
    /// Stand-in for the native default pipeline.
    default_program: ShaderProgram<C>,
    /// Program currently in effect.
    active: ActiveBinding,
}

impl<C: GraphicsContext> Registry<C> {
    /// Create an empty registry bound to the default pipeline.
    pub fn new(context: C) -> Self {
        Self {
            context,
            programs: HashMap::new(),
            default_program: ShaderProgram::default_pipeline(),
            active: ActiveBinding::Default,
        }
    }

    /// Get the graphics context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Build a program and register it under `key`.
    ///
    /// Any program previously registered under `key` is replaced. If the build fails, `key`
    /// is registered with the default pipeline instead and the error is returned; binding
    /// `key` then behaves as if it was never registered.
    pub fn create_shader(
        &mut self,
        key: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<(), ShaderBuildError> {
        let start_time = chrono::Local::now();
        let result = build_program(&self.context, vertex_source, fragment_source);
        let build_time = chrono::Local::now() - start_time;

        let (slot, result) = match result {
            Ok(program) => {
                log::debug!(
                    "Built shader '{key}' ({:?}) in {} ms.",
                    program.handle(),
                    build_time.num_milliseconds()
                );
                (Slot::Program(program), Ok(()))
            }
            Err(e) => {
                log::error!("Failed to create shader '{key}': {e}");
                (Slot::Fallback, Err(e))
            }
        };

        let previous = self.programs.insert(key.to_owned(), slot);

        // The pipeline must not keep using a program that is about to be released.
        if self.active.key() == Some(key) {
            self.bind_active();
        }

        if let Some(Slot::Program(previous)) = previous {
            log::trace!("Releasing replaced shader '{key}' ({:?}).", previous.handle());
            previous.release(&self.context);
        }

        result
    }

    /// Build and register a program from a descriptor.
    pub fn create_shader_from(
        &mut self,
        key: &str,
        descriptor: &ShaderDescriptor,
    ) -> Result<(), ShaderBuildError> {
        self.create_shader(key, descriptor.vertex_shader, descriptor.fragment_shader)
    }

    /// Bind the program registered under `key`.
    ///
    /// If there is no usable program under `key`, the default pipeline is bound and false
    /// is returned.
    pub fn bind(&mut self, key: &str) -> bool {
        let found = self.program(key).is_some();
        if self.active.select(key, found) {
            if let Some(program) = self.program(key) {
                program.bind(&self.context);
            }
        } else {
            log::debug!("No shader '{key}', binding the default pipeline.");
            self.default_program.bind(&self.context);
        }
        found
    }

    /// Bind the active program again.
    ///
    /// Returns false, binding the default pipeline, if no program is active.
    pub fn bind_active(&mut self) -> bool {
        let bound = match self.active.key().and_then(|key| self.program(key)) {
            Some(program) => {
                program.bind(&self.context);
                true
            }
            None => false,
        };

        if !bound {
            self.active.reset();
            self.default_program.bind(&self.context);
        }
        bound
    }

    /// Make the program registered under `key` the active one without binding it.
    ///
    /// Returns false, leaving the default pipeline active, if there is no such program.
    pub fn set_active_shader(&mut self, key: &str) -> bool {
        let found = self.program(key).is_some();
        self.active.select(key, found)
    }

    /// Bind the default pipeline.
    pub fn bind_default(&mut self) {
        self.active.reset();
        self.default_program.bind(&self.context);
    }

    /// Unbind the active program, going back to the default pipeline.
    pub fn unbind(&mut self) {
        self.bind_default();
    }

    /// Look up the program registered under `key`.
    ///
    /// A key whose build failed resolves to the default pipeline.
    pub fn get(&self, key: &str) -> Option<&ShaderProgram<C>> {
        self.programs.get(key).map(|slot| match slot {
            Slot::Program(program) => program,
            Slot::Fallback => &self.default_program,
        })
    }

    /// True if `key` was registered, successfully or not.
    pub fn contains(&self, key: &str) -> bool {
        self.programs.contains_key(key)
    }

    /// Get the registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    /// Get the number of registered keys.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// True if no key was registered.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Get the active binding.
    pub fn active(&self) -> &ActiveBinding {
        &self.active
    }

    /// Get the program the active binding refers to.
    pub fn active_program(&self) -> &ShaderProgram<C> {
        self.active
            .key()
            .and_then(|key| self.program(key))
            .unwrap_or(&self.default_program)
    }

    /// Get the default pipeline program.
    pub fn default_program(&self) -> &ShaderProgram<C> {
        &self.default_program
    }

    /// Successfully built program registered under `key`.
    fn program(&self, key: &str) -> Option<&ShaderProgram<C>> {
        match self.programs.get(key) {
            Some(Slot::Program(program)) => Some(program),
            _ => None,
        }
    }
}

impl<C: GraphicsContext> Drop for Registry<C> {
    fn drop(&mut self) {
        for (_, slot) in self.programs.drain() {
            if let Slot::Program(program) = slot {
                program.release(&self.context);
            }
        }
    }
}
