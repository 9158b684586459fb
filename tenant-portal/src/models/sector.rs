//! Fixed catalog of industry sectors offered during registration.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sector {
    pub id: &'static str,
    pub name: &'static str,
}

/// Sectors in display order.
pub const SECTORS: [Sector; 9] = [
    Sector { id: "654c976bf1d5c28fae7b6c30", name: "Technology" },
    Sector { id: "654c976bf1d5c28fae7b6c38", name: "Healthcare" },
    Sector { id: "654c976bf1d5c28fae7b6c31", name: "Finance" },
    Sector { id: "654c976bf1d5c28fae7b6c32", name: "Education" },
    Sector { id: "654c976bf1d5c28fae7b6c33", name: "Manufacturing" },
    Sector { id: "654c976bf1d5c28fae7b6c34", name: "Retail" },
    Sector { id: "654c976bf1d5c28fae7b6c35", name: "Transportation" },
    Sector { id: "654c976bf1d5c28fae7b6c36", name: "Construction" },
    Sector { id: "654c976bf1d5c28fae7b6c37", name: "Energy" },
];

impl Sector {
    pub fn all() -> &'static [Sector] {
        &SECTORS
    }

    pub fn find(id: &str) -> Option<&'static Sector> {
        SECTORS.iter().find(|sector| sector.id == id)
    }

    pub fn name_of(id: &str) -> Option<&'static str> {
        Self::find(id).map(|sector| sector.name)
    }
}
