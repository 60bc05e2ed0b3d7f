// Application layer: one function per CLI command, wired against the ports.

pub mod commands;
