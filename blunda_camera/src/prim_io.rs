/// Prim I/O: reading and writing a camera as attributes on a scene prim.
///
/// The scene description itself is a collaborator: anything that
/// implements `CameraPrim` can be read from or written to. Reads never
/// fail; an attribute that cannot be read leaves the camera's default
/// in place, is recorded in the `ImportReport` and logged. Writes fail
/// only when the prim refuses them.

use std::fmt;
use bitflags::bitflags;
use glam::{DMat4, Vec2, Vec4};
use crate::camera::{BlundaCamera, Projection};
use crate::error::BlundaResult;
use crate::range::Range1f;
use crate::registry::EnumRegistry;
use crate::schema::attrs;

// ===== VALUES =====

/// Time coordinate at which an attribute is read or written.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeCode {
    /// The attribute's non-animated value
    #[default]
    Default,
    /// A sample time
    At(f64),
}

/// Attribute value as stored on a prim.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Token(String),
    Float(f32),
    Float2(Vec2),
    Float4Array(Vec<Vec4>),
    Matrix4d(DMat4),
    Bool(bool),
}

impl AttributeValue {
    /// Scene-description type name of the value.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Token(_) => "token",
            AttributeValue::Float(_) => "float",
            AttributeValue::Float2(_) => "float2",
            AttributeValue::Float4Array(_) => "float4[]",
            AttributeValue::Matrix4d(_) => "matrix4d",
            AttributeValue::Bool(_) => "bool",
        }
    }
}

/// Why an attribute could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeDiagnostic {
    /// The prim has no such attribute
    Missing { attribute: String, prim: String },
    /// The attribute holds a value of another type
    TypeMismatch {
        attribute: String,
        prim: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for AttributeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeDiagnostic::Missing { attribute, prim } => {
                write!(f, "{} attribute on prim {} missing.", attribute, prim)
            }
            AttributeDiagnostic::TypeMismatch { attribute, prim, expected, found } => write!(
                f,
                "Failed to extract value from attribute {} at <{}>: expected {}, found {}.",
                attribute, prim, expected, found
            ),
        }
    }
}

/// Rust types an `AttributeValue` can be extracted as.
pub trait FromAttribute: Sized {
    const TYPE_NAME: &'static str;

    fn from_attribute(value: AttributeValue) -> Option<Self>;
}

impl FromAttribute for f32 {
    const TYPE_NAME: &'static str = "float";

    fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FromAttribute for String {
    const TYPE_NAME: &'static str = "token";

    fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Token(v) => Some(v),
            _ => None,
        }
    }
}

impl FromAttribute for Vec2 {
    const TYPE_NAME: &'static str = "float2";

    fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Float2(v) => Some(v),
            _ => None,
        }
    }
}

impl FromAttribute for Vec<Vec4> {
    const TYPE_NAME: &'static str = "float4[]";

    fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Float4Array(v) => Some(v),
            _ => None,
        }
    }
}

impl FromAttribute for DMat4 {
    const TYPE_NAME: &'static str = "matrix4d";

    fn from_attribute(value: AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Matrix4d(v) => Some(v),
            _ => None,
        }
    }
}

// ===== PRIM SEAM =====

/// A scene prim that can carry camera attributes.
pub trait CameraPrim {
    /// Scene path, e.g. `/World/cam`.
    fn path(&self) -> &str;

    /// Prim type name, e.g. `BlundaCamera`.
    fn type_name(&self) -> &str;

    /// Value of `name` at `time`.
    fn attribute(&self, name: &str, time: TimeCode) -> std::result::Result<AttributeValue, AttributeDiagnostic>;

    /// Author `value` on `name` at `time`, creating the attribute if needed.
    fn set_attribute(&mut self, name: &str, value: AttributeValue, time: TimeCode) -> BlundaResult<()>;

    /// Prim-to-world transform.
    fn compute_local_to_world(&self, time: TimeCode) -> DMat4;

    /// Parent-to-world transform (identity for root prims).
    fn compute_parent_to_world(&self, time: TimeCode) -> DMat4;

    /// Replace the prim's transform operations with a single matrix.
    ///
    /// Fails with `BlundaError::TransformBlocked` when a stronger opinion
    /// governs the prim's transform.
    fn set_matrix_transform(&mut self, matrix: DMat4, time: TimeCode) -> BlundaResult<()>;
}

/// Typed read of one attribute.
pub fn get_value<T, P>(prim: &P, name: &str, time: TimeCode) -> std::result::Result<T, AttributeDiagnostic>
where
    T: FromAttribute,
    P: CameraPrim + ?Sized,
{
    let value = prim.attribute(name, time)?;
    let found = value.type_name();

    T::from_attribute(value).ok_or_else(|| AttributeDiagnostic::TypeMismatch {
        attribute: name.to_string(),
        prim: prim.path().to_string(),
        expected: T::TYPE_NAME,
        found,
    })
}

// ===== IMPORT =====

bitflags! {
    /// Camera attributes, used to report what an import could not read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CameraAttrs: u16 {
        const PROJECTION = 1 << 0;
        const HORIZONTAL_APERTURE = 1 << 1;
        const VERTICAL_APERTURE = 1 << 2;
        const HORIZONTAL_APERTURE_OFFSET = 1 << 3;
        const VERTICAL_APERTURE_OFFSET = 1 << 4;
        const FOCAL_LENGTH = 1 << 5;
        const CLIPPING_RANGE = 1 << 6;
        const CLIPPING_PLANES = 1 << 7;
        const F_STOP = 1 << 8;
        const FOCUS_DISTANCE = 1 << 9;
        const HOHOHO = 1 << 10;
    }
}

/// Import policy
#[derive(Debug, Clone)]
pub struct CameraIoConfig {
    /// Log a warning for each attribute that cannot be read
    pub warn_on_missing: bool,
}

impl Default for CameraIoConfig {
    fn default() -> Self {
        Self { warn_on_missing: true }
    }
}

/// What `read_camera` could not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Attributes that were missing or held the wrong type
    pub missing: CameraAttrs,
    /// Attributes that were read but held an unrecognized value
    pub invalid: CameraAttrs,
}

impl ImportReport {
    /// `true` if every attribute was read and understood.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

struct Reader<'a, P: CameraPrim + ?Sized> {
    prim: &'a P,
    time: TimeCode,
    config: &'a CameraIoConfig,
    report: ImportReport,
}

impl<P: CameraPrim + ?Sized> Reader<'_, P> {
    fn get<T: FromAttribute>(&mut self, name: &str, flag: CameraAttrs) -> Option<T> {
        match get_value(self.prim, name, self.time) {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                if self.config.warn_on_missing {
                    crate::blunda_warn!("blunda::prim_io", "{}", diagnostic);
                }
                self.report.missing |= flag;
                None
            }
        }
    }
}

/// Read a camera from `prim` at `time`.
///
/// The transform is the prim's local-to-world transform. Unreadable
/// attributes keep `BlundaCamera::default()` values. An unknown
/// projection token yields a perspective camera.
pub fn read_camera<P: CameraPrim + ?Sized>(
    prim: &P,
    time: TimeCode,
    registry: &EnumRegistry,
    config: &CameraIoConfig,
) -> (BlundaCamera, ImportReport) {
    let mut camera = BlundaCamera::default();
    camera.set_transform(prim.compute_local_to_world(time));

    let mut reader = Reader { prim, time, config, report: ImportReport::default() };

    if let Some(token) = reader.get::<String>(attrs::PROJECTION, CameraAttrs::PROJECTION) {
        let projection = registry.value_of::<Projection>(&token).unwrap_or_else(|| {
            crate::blunda_warn!("blunda::prim_io", "Unknown projection type {}", token);
            reader.report.invalid |= CameraAttrs::PROJECTION;
            Projection::Perspective
        });
        camera.set_projection(projection);
    }

    if let Some(v) = reader.get(attrs::HORIZONTAL_APERTURE, CameraAttrs::HORIZONTAL_APERTURE) {
        camera.set_horizontal_aperture(v);
    }
    if let Some(v) = reader.get(attrs::VERTICAL_APERTURE, CameraAttrs::VERTICAL_APERTURE) {
        camera.set_vertical_aperture(v);
    }
    if let Some(v) = reader.get(attrs::HORIZONTAL_APERTURE_OFFSET, CameraAttrs::HORIZONTAL_APERTURE_OFFSET) {
        camera.set_horizontal_aperture_offset(v);
    }
    if let Some(v) = reader.get(attrs::VERTICAL_APERTURE_OFFSET, CameraAttrs::VERTICAL_APERTURE_OFFSET) {
        camera.set_vertical_aperture_offset(v);
    }
    if let Some(v) = reader.get(attrs::FOCAL_LENGTH, CameraAttrs::FOCAL_LENGTH) {
        camera.set_focal_length(v);
    }
    if let Some(v) = reader.get::<Vec2>(attrs::CLIPPING_RANGE, CameraAttrs::CLIPPING_RANGE) {
        camera.set_clipping_range(Range1f::from(v));
    }
    if let Some(v) = reader.get(attrs::CLIPPING_PLANES, CameraAttrs::CLIPPING_PLANES) {
        camera.set_clipping_planes(v);
    }
    if let Some(v) = reader.get(attrs::F_STOP, CameraAttrs::F_STOP) {
        camera.set_f_stop(v);
    }
    if let Some(v) = reader.get(attrs::FOCUS_DISTANCE, CameraAttrs::FOCUS_DISTANCE) {
        camera.set_focus_distance(v);
    }
    if let Some(v) = reader.get(attrs::HOHOHO, CameraAttrs::HOHOHO) {
        camera.set_hohoho(v);
    }

    (camera, reader.report)
}

// ===== EXPORT =====

/// Write `camera` to `prim` at `time`.
///
/// The camera's world transform is converted to a parent-relative matrix
/// and authored first, replacing the prim's transform operations. If the
/// prim refuses that write nothing else is written and the error is
/// returned.
///
/// Attribute writes are not transactional. When one fails, the new
/// transform and every attribute written before it stay on the prim,
/// the remaining attributes keep their old values, and the error is
/// returned.
pub fn write_camera<P: CameraPrim + ?Sized>(
    prim: &mut P,
    camera: &BlundaCamera,
    time: TimeCode,
    registry: &EnumRegistry,
) -> BlundaResult<()> {
    let parent_to_world_inverse = prim.compute_parent_to_world(time).inverse();
    let local = parent_to_world_inverse * *camera.transform();

    if let Err(err) = prim.set_matrix_transform(local, time) {
        crate::blunda_error!(
            "blunda::prim_io",
            "Cannot write camera to <{}>: {}",
            prim.path(),
            err
        );
        return Err(err);
    }

    match registry.name_of(camera.projection()) {
        Some(token) => {
            prim.set_attribute(attrs::PROJECTION, AttributeValue::Token(token.to_string()), time)?
        }
        None => crate::blunda_warn!(
            "blunda::prim_io",
            "Unknown projection type {:?}",
            camera.projection()
        ),
    }

    let floats = [
        (attrs::HORIZONTAL_APERTURE, camera.horizontal_aperture()),
        (attrs::VERTICAL_APERTURE, camera.vertical_aperture()),
        (attrs::HORIZONTAL_APERTURE_OFFSET, camera.horizontal_aperture_offset()),
        (attrs::VERTICAL_APERTURE_OFFSET, camera.vertical_aperture_offset()),
        (attrs::FOCAL_LENGTH, camera.focal_length()),
    ];
    for (name, value) in floats {
        prim.set_attribute(name, AttributeValue::Float(value), time)?;
    }

    prim.set_attribute(
        attrs::CLIPPING_RANGE,
        AttributeValue::Float2(camera.clipping_range().into()),
        time,
    )?;
    prim.set_attribute(
        attrs::CLIPPING_PLANES,
        AttributeValue::Float4Array(camera.clipping_planes().to_vec()),
        time,
    )?;
    prim.set_attribute(attrs::F_STOP, AttributeValue::Float(camera.f_stop()), time)?;
    prim.set_attribute(attrs::FOCUS_DISTANCE, AttributeValue::Float(camera.focus_distance()), time)?;
    prim.set_attribute(attrs::HOHOHO, AttributeValue::Float(camera.hohoho()), time)?;

    Ok(())
}

#[cfg(test)]
#[path = "prim_io_tests.rs"]
mod tests;
