//! Domain models for the Goatique API.
//!
//! Rows are fetched into private row structs in the repository layer and
//! converted into these models, parsing JSON text columns on the way.

pub mod message;
pub mod order;
pub mod post;
pub mod product;
pub mod user;

pub use message::{Message, NewMessage};
pub use order::{NewOrder, Order};
pub use post::{Post, PostDraft};
pub use product::{Product, ProductDraft};
pub use user::AdminUser;
