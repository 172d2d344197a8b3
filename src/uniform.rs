//! Sending typed values to uniform variables of the active program.

use cgmath::{Vector2, Vector3, Vector4};

use crate::context::GraphicsContext;
use crate::error::UniformError;
use crate::registry::Registry;

/// Sequence of values with a cursor, filled by the caller and consumed by a uniform setter.
///
/// Values are written at `position`. Sending the buffer flips it: everything written so far,
/// starting at the beginning, is transmitted in one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformBuffer<T> {
    /// Backing storage.
    data: Vec<T>,
    /// Read/write cursor.
    position: usize,
    /// End of the readable range.
    limit: usize,
}

impl<T: Copy + Default> UniformBuffer<T> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            position: 0,
            limit: 0,
        }
    }

    /// Create an empty buffer with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            position: 0,
            limit: 0,
        }
    }

    /// Write a value at the cursor and advance it.
    pub fn put(&mut self, value: T) -> &mut Self {
        if self.position < self.data.len() {
            self.data[self.position] = value;
        } else {
            self.data.push(value);
        }
        self.position += 1;
        self.limit = self.limit.max(self.position);
        self
    }

    /// Write several values at the cursor.
    pub fn put_slice(&mut self, values: &[T]) -> &mut Self {
        for &value in values {
            self.put(value);
        }
        self
    }

    /// Make the values written so far readable from the start.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Move the cursor back to the start, keeping the limit.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Forget all values.
    pub fn clear(&mut self) {
        self.data.clear();
        self.position = 0;
        self.limit = 0;
    }

    /// Get the values between the cursor and the limit.
    pub fn remaining(&self) -> &[T] {
        &self.data[self.position..self.limit]
    }

    /// Get the cursor position.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl UniformBuffer<f32> {
    /// Write vectors component by component, as expected by `vecN[]` uniforms.
    pub fn put_vectors<const N: usize>(&mut self, vectors: &[[f32; N]]) -> &mut Self
    where
        [f32; N]: bytemuck::Pod,
    {
        self.put_slice(bytemuck::cast_slice(vectors))
    }
}

impl<C: GraphicsContext> Registry<C> {
    /// Resolve `name` on the active program.
    ///
    /// Returns `None` when the default pipeline is active. The inner `None` is the inert
    /// location of a name the program does not declare.
    fn active_location(&self, name: &str) -> Option<Option<C::UniformLocation>> {
        let handle = self.active_program().handle()?;
        let location = self.context().uniform_location(handle, name);
        if location.is_none() {
            log::trace!("Uniform '{name}' not found in program {handle:?}.");
        }
        Some(location)
    }

    /// Set a `float` uniform of the active program.
    pub fn set_uniform_f32(&self, name: &str, value: f32) {
        if let Some(location) = self.active_location(name) {
            self.context().uniform_1_f32(location.as_ref(), value);
        }
    }

    /// Set an `int` uniform of the active program.
    pub fn set_uniform_i32(&self, name: &str, value: i32) {
        if let Some(location) = self.active_location(name) {
            self.context().uniform_1_i32(location.as_ref(), value);
        }
    }

    /// Set a `vec2` uniform of the active program.
    pub fn set_uniform_vec2(
        &self,
        name: &str,
        value: Option<&Vector2<f32>>,
    ) -> Result<(), UniformError> {
        let value = value.ok_or(UniformError::NullArgument { param: "value" })?;
        if let Some(location) = self.active_location(name) {
            self.context()
                .uniform_2_f32(location.as_ref(), value.x, value.y);
        }
        Ok(())
    }

    /// Set a `vec3` uniform of the active program.
    pub fn set_uniform_vec3(
        &self,
        name: &str,
        value: Option<&Vector3<f32>>,
    ) -> Result<(), UniformError> {
        let value = value.ok_or(UniformError::NullArgument { param: "value" })?;
        if let Some(location) = self.active_location(name) {
            self.context()
                .uniform_3_f32(location.as_ref(), value.x, value.y, value.z);
        }
        Ok(())
    }

    /// Set a `vec4` uniform of the active program.
    pub fn set_uniform_vec4(
        &self,
        name: &str,
        value: Option<&Vector4<f32>>,
    ) -> Result<(), UniformError> {
        let value = value.ok_or(UniformError::NullArgument { param: "value" })?;
        if let Some(location) = self.active_location(name) {
            self.context()
                .uniform_4_f32(location.as_ref(), value.x, value.y, value.z, value.w);
        }
        Ok(())
    }

    /// Send the values written to `buffer` to a `float[]` uniform of the active program.
    pub fn set_uniform_f32_buffer(&self, name: &str, buffer: &mut UniformBuffer<f32>) {
        if let Some(location) = self.active_location(name) {
            buffer.flip();
            self.context()
                .uniform_1_f32_slice(location.as_ref(), buffer.remaining());
        }
    }

    /// Send the values written to `buffer` to an `int[]` uniform of the active program.
    pub fn set_uniform_i32_buffer(&self, name: &str, buffer: &mut UniformBuffer<i32>) {
        if let Some(location) = self.active_location(name) {
            buffer.flip();
            self.context()
                .uniform_1_i32_slice(location.as_ref(), buffer.remaining());
        }
    }
}
