use crate::error::ItineraryError;

/// Provider category aliases, deduplicated and in the order the interests
/// named them. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet(Vec<&'static str>);

impl CategorySet {
    /// Provider query form, e.g. `"parks,museums"`
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

pub struct InterestCategoryMapper;

impl InterestCategoryMapper {
    /// Map free-text interests onto the directory's category vocabulary.
    ///
    /// Unknown tags are dropped. If nothing maps the caller gave us no usable
    /// interests and the request is rejected before any provider is called.
    pub fn map_interests(interests: &[String]) -> Result<CategorySet, ItineraryError> {
        let mut categories: Vec<&'static str> = Vec::new();

        for interest in interests {
            match Self::category_for(interest) {
                Some(category) if !categories.contains(&category) => categories.push(category),
                Some(_) => {}
                None => log::debug!("Dropping unmapped interest '{}'", interest),
            }
        }

        if categories.is_empty() {
            return Err(ItineraryError::input(format!(
                "none of the interests {:?} match a known category",
                interests
            )));
        }

        Ok(CategorySet(categories))
    }

    /// Look up a single interest tag (case-insensitive)
    pub fn category_for(interest: &str) -> Option<&'static str> {
        let tag = interest.trim().to_lowercase();
        let category = match tag.as_str() {
            "restaurants" | "restaurant" | "dining" | "dinner" => "restaurants",
            "food" | "foodie" => "food",
            "movies" | "movie" | "cinema" | "film" => "movietheaters",
            "parks" | "park" | "nature" | "outdoors" => "parks",
            "museums" | "museum" | "history" => "museums",
            "art" | "galleries" | "gallery" => "galleries",
            "coffee" | "coffee shops" => "coffee",
            "cafes" | "cafe" | "brunch" => "cafes",
            "bars" | "bar" | "drinks" | "cocktails" => "bars",
            "wine" | "wine bars" => "wine_bars",
            "nightlife" => "nightlife",
            "music" | "live music" | "concerts" => "musicvenues",
            "theater" | "theatre" | "shows" => "theater",
            "comedy" => "comedyclubs",
            "dancing" | "dance" | "clubs" => "danceclubs",
            "shopping" | "shops" => "shopping",
            "hiking" | "hike" | "trails" => "hiking",
            "beaches" | "beach" => "beaches",
            "dessert" | "desserts" | "ice cream" => "desserts",
            "bowling" => "bowling",
            "arcades" | "arcade" | "games" => "arcades",
            "spa" | "spas" | "relaxation" => "spas",
            "zoo" | "zoos" => "zoos",
            "aquarium" | "aquariums" => "aquariums",
            _ => return None,
        };
        Some(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unmapped_tags_are_dropped() {
        let categories =
            InterestCategoryMapper::map_interests(&tags(&["parks", "unknown-tag"])).unwrap();
        assert_eq!(categories.joined(), "parks");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(InterestCategoryMapper::category_for("Movies"), Some("movietheaters"));
        assert_eq!(InterestCategoryMapper::category_for("  RESTAURANTS "), Some("restaurants"));
    }

    #[test]
    fn test_duplicate_categories_collapse_in_order() {
        let categories = InterestCategoryMapper::map_interests(&tags(&[
            "coffee", "park", "Parks", "museums",
        ]))
        .unwrap();
        assert_eq!(categories.joined(), "coffee,parks,museums");
        assert_eq!(categories.joined(), "coffee,parks,museums");
    }

    #[test]
    fn test_no_interests_is_input_error() {
        let result = InterestCategoryMapper::map_interests(&[]);
        assert!(matches!(result, Err(ItineraryError::Input { .. })));
    }

    #[test]
    fn test_all_unmapped_is_input_error() {
        let result = InterestCategoryMapper::map_interests(&tags(&["skydiving", "???"]));
        assert!(matches!(result, Err(ItineraryError::Input { .. })));
    }
}
