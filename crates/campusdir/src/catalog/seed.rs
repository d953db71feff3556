//! Embedded seed data for the La Trobe University Bundoora campus.

use super::{Club, ClubCategory, Coordinate, EntryId, PointOfInterest};

/// The ten campus locations shown on the map, in display order.
#[must_use]
pub fn locations() -> Vec<PointOfInterest> {
    [
        (
            1,
            "La Trobe University Main Entrance",
            "Main entrance to La Trobe University",
            -37.719_161,
            145.048_103,
        ),
        (
            2,
            "Agora",
            "Central hub with food and amenities",
            -37.721_837,
            145.048_825,
        ),
        (
            3,
            "Library (Borchardt Library)",
            "Main Library Building",
            -37.722_434,
            145.048_223,
        ),
        (
            4,
            "Sports Centre (Sports Park)",
            "Sports and recreation facilities",
            -37.726_112,
            145.051_724,
        ),
        (
            5,
            "Glenn College",
            "Student accommodation",
            -37.723_993,
            145.043_601,
        ),
        (
            6,
            "Menzies College",
            "Student accommodation",
            -37.724_365,
            145.045_280,
        ),
        (
            7,
            "Moat Theatre",
            "Theatre and performance venue",
            -37.721_548,
            145.049_951,
        ),
        (
            8,
            "Union Hall",
            "Event and Orientation Hall",
            -37.721_408,
            145.050_462,
        ),
        (
            9,
            "La Trobe Wildlife Sanctuary",
            "Wildlife sanctuary and nature reserve",
            -37.724_825,
            145.056_798,
        ),
        (
            10,
            "Kingsbury Drive Bus Interchange",
            "Main bus interchange",
            -37.719_991,
            145.046_688,
        ),
    ]
    .into_iter()
    .map(|(id, name, description, lat, lon)| {
        PointOfInterest::new(EntryId(id), name, description, Coordinate::new(lat, lon))
    })
    .collect()
}

/// Club categories, in display order.
#[must_use]
pub fn club_categories() -> Vec<ClubCategory> {
    vec![
        ClubCategory::new("academics", "Academics", "school", "#4A90E2"),
        ClubCategory::new("sports", "Sports", "football", "#50C878"),
        ClubCategory::new("creative", "Creative & Fun", "color-palette", "#FF6B6B"),
        ClubCategory::new("cultural", "Cultural & Faith", "globe", "#9B59B6"),
        ClubCategory::new("political", "Political", "people", "#E67E22"),
        ClubCategory::new("wellbeing", "Wellbeing", "heart", "#E74C3C"),
    ]
}

/// The eighteen clubs, grouped by category in catalog order.
#[must_use]
#[rustfmt::skip]
pub fn clubs() -> Vec<Club> {
    [
        (1, "academics", "Computer Science Society", "Exploring technology and programming together", 45, "Every Tuesday 6:00 PM", "Engineering Building Room 101"),
        (2, "academics", "Mathematics Club", "Solving complex problems and mathematical puzzles", 32, "Every Thursday 5:30 PM", "Science Building Room 205"),
        (3, "academics", "Physics Society", "Understanding the laws that govern our universe", 28, "Every Monday 7:00 PM", "Physics Lab A"),
        (4, "sports", "Basketball Club", "Competitive and recreational basketball", 60, "Every Wednesday 4:00 PM", "Sports Complex Court 1"),
        (5, "sports", "Soccer Team", "University soccer team and training", 35, "Every Friday 3:30 PM", "University Field"),
        (6, "sports", "Swimming Club", "Swimming lessons and competitive training", 42, "Every Tuesday 5:00 PM", "Aquatic Center"),
        (7, "creative", "Art Club", "Express yourself through various art forms", 38, "Every Thursday 6:30 PM", "Art Studio"),
        (8, "creative", "Photography Society", "Capture moments and learn photography skills", 25, "Every Saturday 10:00 AM", "Media Center"),
        (9, "creative", "Drama Club", "Acting, directing, and theatrical productions", 30, "Every Monday 6:00 PM", "Theater Building"),
        (10, "cultural", "International Students Association", "Connecting students from around the world", 85, "Every Friday 5:00 PM", "Student Center"),
        (11, "cultural", "Christian Fellowship", "Spiritual growth and community building", 55, "Every Sunday 4:00 PM", "Chapel"),
        (12, "cultural", "Cultural Dance Group", "Celebrating diversity through dance", 40, "Every Wednesday 7:00 PM", "Dance Studio"),
        (13, "political", "Student Government", "Representing student interests and organizing events", 15, "Every Tuesday 5:00 PM", "Student Union"),
        (14, "political", "Debate Society", "Engaging in meaningful discussions and debates", 35, "Every Thursday 7:00 PM", "Debate Hall"),
        (15, "political", "Environmental Club", "Promoting sustainability and environmental awareness", 48, "Every Saturday 2:00 PM", "Green Space"),
        (16, "wellbeing", "Mental Health Support Group", "Supporting mental health and wellness", 22, "Every Monday 6:30 PM", "Counseling Center"),
        (17, "wellbeing", "Yoga Club", "Mindfulness and physical wellness through yoga", 65, "Every Tuesday 7:00 AM", "Wellness Center"),
        (18, "wellbeing", "Peer Support Network", "Student-to-student support and mentoring", 30, "Every Wednesday 5:30 PM", "Student Services"),
    ]
    .into_iter()
    .map(
        |(id, category, name, description, members, meeting_time, venue)| Club {
            id: EntryId(id),
            name: name.to_string(),
            description: description.to_string(),
            members,
            category: Some(category.to_string()),
            meeting_time: Some(meeting_time.to_string()),
            venue: Some(venue.to_string()),
        },
    )
    .collect()
}
