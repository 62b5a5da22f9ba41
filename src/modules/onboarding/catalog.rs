use serde::Serialize;

/// An ecological interest theme a user can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interest {
    pub id: &'static str,
    pub name: &'static str,
}

/// A community activity proposed during onboarding. Static reference data,
/// not fetched from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub location: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub participants: u32,
    pub max_participants: u32,
    pub difficulty: &'static str,
    /// Interest category driving the recommendation split.
    pub category: &'static str,
    pub tags: &'static [&'static str],
}

pub const INTERESTS: &[Interest] = &[
    Interest { id: "recycling", name: "Recyclage & Déchets" },
    Interest { id: "transport", name: "Transport Vert" },
    Interest { id: "energy", name: "Énergies Renouvelables" },
    Interest { id: "home", name: "Maison Écologique" },
    Interest { id: "food", name: "Alimentation Durable" },
    Interest { id: "electric", name: "Véhicules Électriques" },
    Interest { id: "efficiency", name: "Efficacité Énergétique" },
    Interest { id: "nature", name: "Protection Nature" },
    Interest { id: "water", name: "Gestion de l'Eau" },
    Interest { id: "air", name: "Qualité de l'Air" },
    Interest { id: "biodiversity", name: "Biodiversité" },
    Interest { id: "garden", name: "Jardinage Écologique" },
];

pub const ACTIVITIES: &[Activity] = &[
    Activity {
        id: "bike-tour",
        title: "Balade à vélo écologique",
        description: "Découverte des pistes cyclables de la ville",
        location: "Centre-ville, Tunis",
        date: "Samedi 15 juillet",
        time: "09:00 - 12:00",
        participants: 12,
        max_participants: 20,
        difficulty: "Facile",
        category: "transport",
        tags: &["Transport vert", "Sport", "Découverte"],
    },
    Activity {
        id: "tree-planting",
        title: "Plantation d'arbres communautaire",
        description: "Participation à la reforestation urbaine",
        location: "Parc Belvédère, Tunis",
        date: "Dimanche 16 juillet",
        time: "08:00 - 11:00",
        participants: 25,
        max_participants: 50,
        difficulty: "Modéré",
        category: "nature",
        tags: &["Reforestation", "Communauté", "Nature"],
    },
    Activity {
        id: "recycling-workshop",
        title: "Atelier de recyclage créatif",
        description: "Apprenez à transformer vos déchets en objets utiles",
        location: "Centre culturel, Sfax",
        date: "Mercredi 19 juillet",
        time: "14:00 - 17:00",
        participants: 8,
        max_participants: 15,
        difficulty: "Facile",
        category: "recycling",
        tags: &["DIY", "Recyclage", "Créativité"],
    },
    Activity {
        id: "organic-cooking",
        title: "Cours de cuisine bio locale",
        description: "Cuisiner avec des produits locaux et de saison",
        location: "Ferme bio, Monastir",
        date: "Samedi 22 juillet",
        time: "10:00 - 14:00",
        participants: 6,
        max_participants: 12,
        difficulty: "Facile",
        category: "food",
        tags: &["Bio", "Local", "Cuisine"],
    },
    Activity {
        id: "urban-garden",
        title: "Jardinage urbain participatif",
        description: "Création d'un potager communautaire",
        location: "Quartier Manouba",
        date: "Samedi 29 juillet",
        time: "08:00 - 12:00",
        participants: 15,
        max_participants: 25,
        difficulty: "Modéré",
        category: "garden",
        tags: &["Jardinage", "Communauté", "Légumes"],
    },
    Activity {
        id: "eco-cleanup",
        title: "Nettoyage écologique des plages",
        description: "Protection du littoral méditerranéen",
        location: "Plage de Hammamet",
        date: "Dimanche 30 juillet",
        time: "07:00 - 10:00",
        participants: 30,
        max_participants: 60,
        difficulty: "Facile",
        category: "nature",
        tags: &["Nettoyage", "Plage", "Protection"],
    },
];

/// Split the activity catalog into recommended (category among the selected
/// interests) and other, recommended first. Pure over static data.
pub fn partition_activities(
    interests: &[String],
) -> (Vec<&'static Activity>, Vec<&'static Activity>) {
    ACTIVITIES
        .iter()
        .partition(|activity| interests.iter().any(|i| i == activity.category))
}

pub fn interest_by_id(id: &str) -> Option<&'static Interest> {
    INTERESTS.iter().find(|interest| interest.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_splits_on_selected_interest_categories() {
        let interests = vec!["nature".to_string(), "food".to_string()];
        let (recommended, other) = partition_activities(&interests);

        let ids: Vec<&str> = recommended.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["tree-planting", "organic-cooking", "eco-cleanup"]);
        assert_eq!(recommended.len() + other.len(), ACTIVITIES.len());
        assert!(other.iter().all(|a| a.category != "nature" && a.category != "food"));
    }

    #[test]
    fn no_interests_recommends_nothing() {
        let (recommended, other) = partition_activities(&[]);
        assert!(recommended.is_empty());
        assert_eq!(other.len(), ACTIVITIES.len());
    }

    #[test]
    fn unknown_interest_recommends_nothing() {
        let interests = vec!["spelunking".to_string()];
        let (recommended, _) = partition_activities(&interests);
        assert!(recommended.is_empty());
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, interest) in INTERESTS.iter().enumerate() {
            assert!(INTERESTS[i + 1..].iter().all(|other| other.id != interest.id));
        }
        for (i, activity) in ACTIVITIES.iter().enumerate() {
            assert!(ACTIVITIES[i + 1..].iter().all(|other| other.id != activity.id));
        }
        assert!(interest_by_id("recycling").is_some());
        assert!(interest_by_id("nonexistent").is_none());
    }
}
