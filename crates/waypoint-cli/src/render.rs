use waypoint_common::{DistanceUnit, Waypoint};

/// Multi-line description of a waypoint.
pub fn waypoint(wp: &Waypoint) -> String {
    format!(
        "{}\n  lat:     {}\n  lon:     {}\n  ele:     {} ft\n  address: {}",
        wp.name(),
        wp.latitude(),
        wp.longitude(),
        wp.elevation(),
        wp.address()
    )
}

/// `"<from> -> <to>: <distance> <unit>, initial bearing <deg> degrees"`
pub fn distance(from: &Waypoint, to: &Waypoint, unit: DistanceUnit) -> String {
    format!(
        "{} -> {}: {:.2} {}, initial bearing {:.2} degrees",
        from.name(),
        to.name(),
        from.distance_great_circle(to, unit),
        unit.label(),
        from.initial_bearing_great_circle(to, unit)
    )
}
