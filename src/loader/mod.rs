//! Reading scenes and meshes from disk.
//!
//! A scene file is a whitespace separated list of directives, each a keyword
//! followed by its parameters:
//!
//! ```text
//! # comment, to the end of the line
//! depth      <int>
//! camera     <eye xyz> <center xyz> <up xyz> <fovy> <width> <height>
//! background <rgb>
//! ambience   <rgb>
//! light      <position xyz> <color rgb>
//! plane      <center xyz> <normal xyz> <material>
//! sphere     <center xyz> <radius> <material>
//! cylinder   <center xyz> <radius> <axis xyz> <height> <material>
//! mesh       <file> <FLAT|PHONG> <material>
//! ```
//!
//! where `<material>` is `<ambient rgb> <diffuse rgb> <specular rgb> <shininess> <mirror>`.
//! Mesh files are OFF, or OBJ when the name ends in `.obj`, and are found
//! relative to the scene file.

mod mesh_file;
mod scene_file;
mod tokenize;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use mesh_file::*;
pub use scene_file::*;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: unexpected end of file, expected {expected}", path.display())]
    UnexpectedEof {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("{}:{line}: expected {expected}, found `{token}`", path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        expected: &'static str,
        token: String,
    },

    #[error("{}:{line}: unknown directive `{token}`", path.display())]
    UnknownDirective {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: invalid draw mode `{token}`, expected FLAT or PHONG", path.display())]
    InvalidDrawMode {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{} is not an OFF file", path.display())]
    NotOff { path: PathBuf },

    #[error("{}: face {face} has {count} vertices, only triangles are supported", path.display())]
    NotTriangle {
        path: PathBuf,
        face: usize,
        count: usize,
    },

    #[error("{}: face {face} refers to vertex {index}, but there are only {vertices}", path.display())]
    IndexOutOfRange {
        path: PathBuf,
        face: usize,
        index: usize,
        vertices: usize,
    },

    #[error("failed to load {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("{} contains no geometry", path.display())]
    EmptyObj { path: PathBuf },
}
