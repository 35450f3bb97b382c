/*!
# Blunda Camera - In-Memory Stage

A small scene-description stage kept entirely in memory.

This crate implements the `blunda_camera` prim seam (`CameraPrim`) over a
flat table of prims, so cameras can be defined, exported, re-imported
and inspected without an external scene library. It is used by hosts
that build scenes programmatically and by the test suites.

```no_run
use blunda_camera::blunda::{read_camera, write_camera, BlundaCamera, CameraIoConfig, EnumRegistry, TimeCode};
use blunda_camera_stage_memory::MemoryStage;

let mut stage = MemoryStage::new();
let registry = EnumRegistry::with_camera_enums();
stage.define_prim("/World", "Xform")?;
let key = stage.define_prim("/World/cam", "BlundaCamera")?;

let mut prim = stage.prim_mut(key).unwrap();
write_camera(&mut prim, &BlundaCamera::default(), TimeCode::Default, &registry)?;
let (camera, report) = read_camera(&prim, TimeCode::Default, &registry, &CameraIoConfig::default());
# Ok::<(), blunda_camera::blunda::BlundaError>(())
```
*/

mod memory_stage;

pub use memory_stage::{MemoryStage, MemoryPrim, MemoryPrimMut, PrimKey, TRANSFORM_OP};
