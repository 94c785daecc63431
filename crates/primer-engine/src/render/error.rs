use std::fmt;

/// Shader stage a diagnostic refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Why a shader program could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProgramError {
    #[error("{stage} shader failed to compile:\n{message}")]
    Compile { stage: Stage, message: String },

    #[error("{stage} shader has no `{name}` entry point")]
    MissingEntryPoint { stage: Stage, name: &'static str },

    #[error("fragment input `{name}` at @location({location}) is not written by the vertex stage")]
    Link { name: String, location: u32 },

    #[error("vertex shader has no attribute named `{0}`")]
    MissingAttribute(String),

    #[error("vertex attribute `{0}` is fed by more than one buffer slot")]
    DuplicateAttribute(String),

    #[error("vertex attribute `{name}` at @location({location}) is not fed by any vertex buffer")]
    UnboundAttribute { name: String, location: u32 },

    #[error("vertex attribute `{0}` has a type that cannot be read from a vertex buffer")]
    UnsupportedAttribute(String),

    #[error("no uniform named `{0}`")]
    MissingUniform(String),

    #[error("uniform `{second}` at @group({group}) @binding({binding}) clashes with `{first}`")]
    UniformConflict {
        first: String,
        second: String,
        group: u32,
        binding: u32,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BufferError {
    #[error("refusing to create empty vertex buffer `{0}`")]
    Empty(String),
}

/// Any failure while preparing GPU resources for a lesson.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
