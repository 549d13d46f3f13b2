//! Configuration section definitions.
//!
//! Each module corresponds to a section in `livepad.toml`:
//!
//! | Module       | TOML Section     | Purpose                            |
//! |--------------|------------------|------------------------------------|
//! | `bridge`     | `[bridge]`       | Libraries exposed to injected code |
//! | `collection` | `[collection]`   | Document directory and index       |
//! | `preview`    | `[preview]`      | Recompile scheduling               |
//! | `serve`      | `[serve]`        | Development server                 |
//! | `transform`  | `[transform]`    | JSX lowering                       |

mod bridge;
mod collection;
mod preview;
mod serve;
mod transform;

pub use bridge::BridgeConfig;
pub use collection::CollectionConfig;
pub use preview::PreviewConfig;
pub use serve::ServeConfig;
pub use transform::TransformConfig;
