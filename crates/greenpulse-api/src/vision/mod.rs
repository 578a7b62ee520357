// Vision API client modules
//
// Client for the `images:annotate` endpoint of the image classification
// provider. Requests object localization, label detection and face
// detection in one call; responses are parsed against a strict schema that
// fails closed per detection kind.

pub mod client;
pub mod models;

pub use client::VisionClient;
pub use models::{
    AnnotateImageResponse, EntityAnnotation, FaceAnnotation, FeatureType,
    LocalizedObjectAnnotation,
};
