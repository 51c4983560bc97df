//! Overtone chord synthesis and spectral feature extraction.
//!
//! The library backs the `overtone_lab` binary, which has two jobs:
//! - `synth`: render chords built from harmonic overtone stacks in
//!   12-tone equal temperament and Pythagorean tuning, then print
//!   frequency tables for both systems
//! - `analyze`: walk a directory of recorded tones and write the mean
//!   spectral centroid and inharmonicity of each file to a CSV table
pub mod audio;
pub mod config;
pub mod features;
pub mod pitch;
pub mod synth;
