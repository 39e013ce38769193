use super::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub types: Vec<String>,
    pub location: Coordinate,
}

impl Place {
    pub fn new(name: impl Into<String>, types: Vec<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            types,
            location,
        }
    }

    /// `"Name (type_a, type_b)"`, the form used when listing places in a prompt.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.types.join(", "))
    }
}

/// A place paired with its measured distance from the search center.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlace {
    pub place: Place,
    pub distance_m: f64,
}
