// src/utils/location.rs

//! Location heuristics for boards that mix remote and on-site listings.

/// Words indicating a listing is not tied to an office.
const REMOTE_MARKERS: [&str; 4] = ["remote", "worldwide", "anywhere", "distributed"];

/// US states and cities that turn a "remote" listing into a region-locked one.
const US_REGIONS: &[&str] = &[
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
    "washington d.c.",
    "washington, d.c.",
    "san francisco",
    "seattle",
    "austin",
    "boston",
    "chicago",
    "remote - us",
    "remote, us",
];

/// True if the location mentions any remote marker.
pub fn is_remote(location: &str) -> bool {
    let loc = location.to_lowercase();
    REMOTE_MARKERS.iter().any(|marker| loc.contains(marker))
}

/// True if the location names a US state, city or US-only remote pool.
pub fn is_us_restricted(location: &str) -> bool {
    let loc = location.to_lowercase();
    US_REGIONS.iter().any(|region| loc.contains(region))
}

/// Remote and, when `worldwide_only` is set, not locked to a US region.
pub fn accepts_remote_location(location: &str, worldwide_only: bool) -> bool {
    is_remote(location) && !(worldwide_only && is_us_restricted(location))
}

/// Lenient check for boards that list few locations: none at all, or any
/// entry marked remote or flexible.
pub fn any_remote_or_flexible<S: AsRef<str>>(locations: &[S]) -> bool {
    locations.is_empty()
        || locations.iter().any(|name| {
            let name = name.as_ref().to_lowercase();
            name.contains("remote") || name.contains("flexible")
        })
}
