//! Error types.

use std::{error::Error, fmt};

use crate::context::StageKind;

/// Possible errors while creating a graphics context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContextCreationError {
    /// The loader could not resolve a required GL function.
    MissingFunction(&'static str),
}

impl Error for ContextCreationError {}

impl fmt::Display for ContextCreationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::MissingFunction(name) => write!(f, "Failed to load the GL function {name}."),
        }
    }
}

/// Possible errors while building a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderBuildError {
    /// One of the two stages failed to compile.
    Compile {
        /// Stage that failed.
        stage: StageKind,
        /// Info log reported by the driver.
        log: String,
    },
    /// Both stages compiled but the program failed to link or validate.
    Link {
        /// Info log reported by the driver.
        log: String,
    },
    /// The driver refused to allocate a stage or program object.
    Allocation {
        /// Kind of object that could not be created.
        object: &'static str,
        /// Reason reported by the driver.
        reason: String,
    },
}

impl Error for ShaderBuildError {}

impl fmt::Display for ShaderBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Compile { stage, log } if log.is_empty() => {
                write!(f, "The {stage} shader failed to compile.")
            }
            Self::Compile { stage, log } => {
                write!(f, "The {stage} shader failed to compile: {}", log.trim_end())
            }
            Self::Link { log } if log.is_empty() => {
                write!(f, "The shader program failed to link.")
            }
            Self::Link { log } => {
                write!(f, "The shader program failed to link: {}", log.trim_end())
            }
            Self::Allocation { object, reason } => {
                write!(f, "Failed to allocate a {object} object: {reason}.")
            }
        }
    }
}

/// Possible errors while sending uniform values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UniformError {
    /// A required argument was not provided.
    NullArgument {
        /// Name of the missing argument.
        param: &'static str,
    },
}

impl Error for UniformError {}

impl fmt::Display for UniformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::NullArgument { param } => write!(f, "Argument `{param}` must be provided."),
        }
    }
}
