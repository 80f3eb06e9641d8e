//! Mesh model: polygons, objects and mesh loading

pub mod geometry;
pub mod obj;

pub use geometry::{create_cube, GeometryError, Object, Polygon3};
pub use obj::{load_obj, load_obj_from_str, ObjError};
