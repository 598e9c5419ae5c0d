//! Blueprint System
//!
//! A blueprint is a reusable group of track items authored once (usually cut
//! out of an existing Liftoff track) and placed many times.
//!
//! ```text
//! Blueprint
//! ├── name: String (template file stem)
//! ├── pivot: position + accumulated placement angles
//! └── items: Vec<Item>
//!     └── item_id, instance_id, position, rotation (+ orientation state)
//! ```
//!
//! Rotations stored in a template are authored about each item's own axes;
//! rotations applied when placing an instance are about the world axes.
//!
//! ## File Structure
//!
//! ```text
//! blueprints/
//! ├── Chicane.xml   # template (Liftoff <TrackBlueprint> fragments)
//! └── Chicane.png   # optional preview
//! ```

mod blueprint;
mod item;
mod library;
mod template;

pub use blueprint::Blueprint;
pub use item::Item;
pub use library::{BlueprintLibrary, Preview, BLUEPRINTS_DIR};
pub use template::{load_template, parse_template, TemplateError, ITEM_ELEMENT};
