//! Drawable resources: materials, models and the OBJ loader.

pub mod material;
pub mod model;
pub mod obj_loader;

pub use material::Material;
pub use model::Model;
pub use obj_loader::load_obj;
