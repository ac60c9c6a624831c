use serde::{Deserialize, Serialize};

/// Canonical latitude/longitude pair used everywhere past the provider boundary.
///
/// Always serializes as `{ "latitude": .., "longitude": .. }`. Deserialization
/// goes through [`CoordinateShape`] so that records written by older producers
/// (a bare `[lat, lon]` array) are read into the same type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "CoordinateShape")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Zero-valued coordinates mark a candidate nobody has located yet
    pub fn is_placeholder(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// The coordinate layouts seen in the wild
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CoordinateShape {
    /// `[latitude, longitude]`
    Pair([f64; 2]),
    /// `{ "latitude": .., "longitude": .. }`
    Nested { latitude: f64, longitude: f64 },
}

impl From<CoordinateShape> for Coordinates {
    fn from(shape: CoordinateShape) -> Self {
        match shape {
            CoordinateShape::Pair([latitude, longitude]) => Coordinates::new(latitude, longitude),
            CoordinateShape::Nested {
                latitude,
                longitude,
            } => Coordinates::new(latitude, longitude),
        }
    }
}

/// A raw place record from a data provider, prior to normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Provider-assigned key; seeds get a synthetic `seed:` key
    pub identity: String,
    pub name: String,
    pub categories: Vec<String>,
    pub coordinates: Coordinates,
    pub rating: f64,
    /// Price symbol as the provider reports it (`"$$"`), absent when unknown
    pub price: Option<String>,
    pub image_url: String,
    pub address: String,
}

impl Candidate {
    /// A name-only candidate, e.g. from the generative step. Location, rating
    /// and price stay zero-valued until the directory fills them in.
    pub fn seed<S: Into<String>>(name: S, category: S) -> Self {
        let name = name.into();
        Self {
            identity: format!("seed:{}", name.trim().to_lowercase()),
            name,
            categories: vec![category.into()],
            coordinates: Coordinates::default(),
            rating: 0.0,
            price: None,
            image_url: String::new(),
            address: String::new(),
        }
    }
}
