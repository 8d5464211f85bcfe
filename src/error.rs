// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types

use std::fmt;

/// Engine error type
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Worker pool could not be constructed
    ThreadPool(String),

    /// A game object's update raised during the parallel phase
    UpdateFailed { object: String, reason: String },

    /// Invalid configuration value
    Config(String),

    /// IO error (config loading, etc.)
    IoError(String),

    /// Failure raised by user component or behavior code
    Custom(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::Custom`] failure from component code.
    pub fn custom(reason: impl Into<String>) -> Self {
        EngineError::Custom(reason.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ThreadPool(msg) => write!(f, "Worker pool error: {msg}"),
            EngineError::UpdateFailed { object, reason } => {
                write!(f, "Update failed for '{object}': {reason}")
            }
            EngineError::Config(msg) => write!(f, "Config error: {msg}"),
            EngineError::IoError(msg) => write!(f, "IO error: {msg}"),
            EngineError::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
