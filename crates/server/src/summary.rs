//! The summary record returned for each recommended movie.

use data_loader::Item;
use engine::format_genres;
use serde::{Serialize, Serializer};

/// Display-ready view of a catalog item.
///
/// Absent text fields render as empty strings and `rating` as `""`, so
/// every summary has the same shape on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub title: String,
    pub tagline: String,
    /// Comma-separated genre names
    pub genres: String,
    /// Four-character year, or empty
    pub year: String,
    #[serde(serialize_with = "number_or_empty")]
    pub rating: Option<f64>,
    pub director: String,
    pub overview: String,
}

impl MovieSummary {
    /// Build the summary for `item`. Never fails.
    pub fn from_item(item: &Item) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        Self {
            title: item.title.clone(),
            tagline: text(&item.tagline),
            genres: format_genres(item.genres.as_deref()),
            year: release_year(item.release_date.as_deref()),
            rating: item.vote_average,
            director: text(&item.director),
            overview: text(&item.overview),
        }
    }
}

/// First four characters of a release date, or empty when there is none.
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.trim().is_empty() => date.chars().take(4).collect(),
        _ => String::new(),
    }
}

/// JSON has no NaN or infinity, so those render as empty too
fn number_or_empty<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(number) if number.is_finite() => serializer.serialize_f64(*number),
        _ => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("1994-07-06")), "1994");
        assert_eq!(release_year(Some("2009")), "2009");
        assert_eq!(release_year(Some("")), "");
        assert_eq!(release_year(Some("   ")), "");
        assert_eq!(release_year(None), "");
    }

    #[test]
    fn test_full_summary() {
        let item = Item {
            genres: Some("[{'id': 18, 'name': 'Drama'}, {'id': 80, 'name': 'Crime'}]".to_string()),
            tagline: Some("Fear can hold you prisoner.".to_string()),
            director: Some("Frank Darabont".to_string()),
            overview: Some("Framed in the 1940s...".to_string()),
            release_date: Some("1994-09-23".to_string()),
            vote_average: Some(8.5),
            ..Item::new("The Shawshank Redemption")
        };

        let summary = MovieSummary::from_item(&item);

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "title": "The Shawshank Redemption",
                "tagline": "Fear can hold you prisoner.",
                "genres": "Drama, Crime",
                "year": "1994",
                "rating": 8.5,
                "director": "Frank Darabont",
                "overview": "Framed in the 1940s...",
            })
        );
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let summary = MovieSummary::from_item(&Item::new("Untitled Project"));

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "title": "Untitled Project",
                "tagline": "",
                "genres": "",
                "year": "",
                "rating": "",
                "director": "",
                "overview": "",
            })
        );
    }

    #[test]
    fn test_rating_is_number_or_empty() {
        for (vote_average, expected) in [
            (Some(7.5), json!(7.5)),
            (None, json!("")),
            (Some(f64::NAN), json!("")),
            (Some(f64::INFINITY), json!("")),
        ] {
            let item = Item {
                vote_average,
                ..Item::new("Heat")
            };
            let value = serde_json::to_value(MovieSummary::from_item(&item)).unwrap();
            assert_eq!(value["rating"], expected);
        }
    }

    #[test]
    fn test_plain_genres_pass_through() {
        let item = Item {
            genres: Some("Action Adventure".to_string()),
            ..Item::new("Avatar")
        };
        assert_eq!(MovieSummary::from_item(&item).genres, "Action Adventure");
    }
}
