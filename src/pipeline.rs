pub mod lighting;
pub mod passes;
pub mod renderer;
pub mod shaders;
