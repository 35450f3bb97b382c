//! Schema tokens: attribute and prim type names as authored in scene files.

/// Prim type names
pub mod types {
    pub const XFORMABLE: &str = "Xformable";
    pub const XFORM: &str = "Xform";
    pub const CAMERA: &str = "Camera";
    pub const BLUNDA_CAMERA: &str = "BlundaCamera";
}

/// Attribute names
pub mod attrs {
    pub const XFORM_OP_ORDER: &str = "xformOpOrder";

    pub const PROJECTION: &str = "projection";
    pub const HORIZONTAL_APERTURE: &str = "horizontalAperture";
    pub const VERTICAL_APERTURE: &str = "verticalAperture";
    pub const HORIZONTAL_APERTURE_OFFSET: &str = "horizontalApertureOffset";
    pub const VERTICAL_APERTURE_OFFSET: &str = "verticalApertureOffset";
    pub const FOCAL_LENGTH: &str = "focalLength";
    pub const CLIPPING_RANGE: &str = "clippingRange";
    pub const CLIPPING_PLANES: &str = "clippingPlanes";
    pub const F_STOP: &str = "fStop";
    pub const FOCUS_DISTANCE: &str = "focusDistance";
    pub const STEREO_ROLE: &str = "stereoRole";
    pub const SHUTTER_OPEN: &str = "shutter:open";
    pub const SHUTTER_CLOSE: &str = "shutter:close";
    pub const EXPOSURE: &str = "exposure";

    pub const HOHOHO: &str = "hohoho";
}

/// Projection tokens
pub mod tokens {
    pub const PERSPECTIVE: &str = "perspective";
    pub const ORTHOGRAPHIC: &str = "orthographic";
    pub const FOV_HORIZONTAL: &str = "FOVHorizontal";
    pub const FOV_VERTICAL: &str = "FOVVertical";
}

/// Attributes declared directly by the `Xformable` schema.
pub const XFORMABLE_ATTRIBUTES: &[&str] = &[attrs::XFORM_OP_ORDER];

/// Attributes declared directly by the `Camera` schema.
pub const CAMERA_ATTRIBUTES: &[&str] = &[
    attrs::PROJECTION,
    attrs::HORIZONTAL_APERTURE,
    attrs::VERTICAL_APERTURE,
    attrs::HORIZONTAL_APERTURE_OFFSET,
    attrs::VERTICAL_APERTURE_OFFSET,
    attrs::FOCAL_LENGTH,
    attrs::CLIPPING_RANGE,
    attrs::CLIPPING_PLANES,
    attrs::F_STOP,
    attrs::FOCUS_DISTANCE,
    attrs::STEREO_ROLE,
    attrs::SHUTTER_OPEN,
    attrs::SHUTTER_CLOSE,
    attrs::EXPOSURE,
];

/// Attributes declared directly by the `BlundaCamera` schema.
pub const BLUNDA_CAMERA_ATTRIBUTES: &[&str] = &[attrs::HOHOHO];
