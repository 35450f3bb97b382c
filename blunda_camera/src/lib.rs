/*!
# Blunda Camera

Camera parameters, viewing frusta and camera prim I/O for scene
description stages.

This crate holds the stage-independent part of a camera plugin: the
`Camera` value type with its conversions between physical lens
parameters and view/projection matrices, the `BlundaCamera` extension
carrying the custom `hohoho` attribute, and the import/export functions
that move both through any stage implementing `CameraPrim`. Stages are
provided by separate crates (see `blunda_camera_stage_memory`).

## Architecture

- **Camera / BlundaCamera**: Plain camera values
- **Frustum**: Viewing volume, matrices and culling
- **EnumRegistry / SchemaRegistry**: Host-owned name tables
- **CameraPrim**: Attribute and transform access on a stage prim
- **read_camera / write_camera**: Prim import and export
- **FlattenedProviders**: Per-name providers for inherited prim data
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod range;
pub mod camera;
pub mod schema;
pub mod registry;
pub mod prim_io;
pub mod flatten;

// Main blunda namespace module
pub mod blunda {
    // Error types
    pub use crate::error::{BlundaError, BlundaResult};

    // Logger holder
    pub use crate::diagnostics::Diagnostics;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera values and frusta
    pub use crate::camera::*;
    pub use crate::range::{Range1f, Range1d, Range2d};

    // Registries
    pub use crate::registry::{EnumRegistry, RegisteredEnum, SchemaInfo, SchemaRegistry};

    // Prim import/export
    pub use crate::prim_io::{
        AttributeDiagnostic, AttributeValue, CameraAttrs, CameraIoConfig, CameraPrim,
        FromAttribute, ImportReport, TimeCode, get_value, read_camera, write_camera,
    };

    // Schema names
    pub mod schema {
        pub use crate::schema::*;
    }

    // Flattened data sources
    pub mod flatten {
        pub use crate::flatten::*;
    }
}

// Re-export math library at crate root
pub use glam;
