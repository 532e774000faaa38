//! Browsing helpers over a restaurant listing: filtering, price tiers and
//! sorting. Pure functions; nothing here touches the store.

use crate::model::Restaurant;
use std::cmp::Ordering;
use std::str::FromStr;

/// Criteria from the browse page. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    /// Any-of cuisine tags.
    pub cuisines: Vec<String>,
    /// Minimum ratings; a restaurant passes if it reaches any of them.
    pub min_ratings: Vec<f64>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let cuisine_ok = self.cuisines.is_empty()
            || self.cuisines.iter().any(|c| restaurant.serves(c));

        let rating_ok = self.min_ratings.is_empty()
            || self.min_ratings.iter().any(|min| restaurant.rating >= *min);

        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                restaurant.name.to_lowercase().contains(&query)
                    || restaurant.description.to_lowercase().contains(&query)
            }
        };

        cuisine_ok && rating_ok && search_ok
    }
}

pub fn filter_restaurants(restaurants: &[Restaurant], filter: &RestaurantFilter) -> Vec<Restaurant> {
    restaurants
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Price level from 1 (`$`) to 4 (`$$$$`).
///
/// A run of dollar signs counts them. A range such as `"$10-$20"` is averaged
/// and bucketed at 10, 20 and 30. Anything unparsable is tier 0.
pub fn price_tier(price_range: &str) -> u8 {
    let price_range = price_range.trim();
    if price_range.is_empty() {
        return 0;
    }
    if price_range.chars().all(|c| c == '$') {
        return u8::try_from(price_range.len()).unwrap_or(u8::MAX);
    }

    let mut bounds = price_range.splitn(2, '-').map(parse_amount);
    let min = match bounds.next().flatten() {
        Some(min) => min,
        None => return 0,
    };
    let average = match bounds.next().flatten() {
        Some(max) => (min + max) / 2.0,
        None => min,
    };

    match average {
        a if a < 10.0 => 1,
        a if a < 20.0 => 2,
        a if a < 30.0 => 3,
        _ => 4,
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// Orderings offered by the browse page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestaurantSort {
    /// Listing order, untouched.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    RatingAsc,
    RatingDesc,
}

impl RestaurantSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantSort::Default => "default",
            RestaurantSort::PriceLow => "price-low",
            RestaurantSort::PriceHigh => "price-high",
            RestaurantSort::RatingAsc => "rating-asc",
            RestaurantSort::RatingDesc => "rating-desc",
        }
    }
}

/// Unknown labels fall back to [`RestaurantSort::Default`].
impl FromStr for RestaurantSort {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-low" => RestaurantSort::PriceLow,
            "price-high" => RestaurantSort::PriceHigh,
            "rating-asc" => RestaurantSort::RatingAsc,
            "rating-desc" => RestaurantSort::RatingDesc,
            _ => RestaurantSort::Default,
        })
    }
}

/// Sorts a copy of `restaurants`. Ties keep their listing order.
pub fn sort_restaurants(restaurants: &[Restaurant], sort: RestaurantSort) -> Vec<Restaurant> {
    let mut sorted = restaurants.to_vec();
    let by_rating = |a: &Restaurant, b: &Restaurant| {
        a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal)
    };

    match sort {
        RestaurantSort::Default => {}
        RestaurantSort::PriceLow => sorted.sort_by_key(|r| price_tier(&r.price_range)),
        RestaurantSort::PriceHigh => {
            sorted.sort_by_key(|r| std::cmp::Reverse(price_tier(&r.price_range)))
        }
        RestaurantSort::RatingAsc => sorted.sort_by(by_rating),
        RestaurantSort::RatingDesc => sorted.sort_by(|a, b| by_rating(b, a)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RestaurantId;
    use crate::seed;

    fn catalog() -> Vec<Restaurant> {
        seed::restaurants()
            .into_iter()
            .enumerate()
            .map(|(i, params)| Restaurant::from_create(RestaurantId(i as u32 + 1), params))
            .collect()
    }

    fn names(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let all = catalog();
        assert_eq!(filter_restaurants(&all, &RestaurantFilter::default()).len(), 8);
    }

    #[test]
    fn cuisine_rating_and_search_combine() {
        let all = catalog();

        let italian = RestaurantFilter {
            cuisines: vec!["Italian".into()],
            ..Default::default()
        };
        assert_eq!(names(&filter_restaurants(&all, &italian)), vec!["Pizza Paradise", "Pasta Palace"]);

        let top_rated_italian = RestaurantFilter {
            min_ratings: vec![4.7],
            ..italian
        };
        assert_eq!(names(&filter_restaurants(&all, &top_rated_italian)), vec!["Pizza Paradise"]);

        let search = RestaurantFilter {
            search: Some("  SUSHI ".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_restaurants(&all, &search)), vec!["Sushi Supreme"]);

        let by_description = RestaurantFilter {
            search: Some("bangkok".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_restaurants(&all, &by_description)), vec!["Thai Delight"]);
    }

    #[test]
    fn any_selected_minimum_is_enough() {
        let all = catalog();
        let filter = RestaurantFilter {
            min_ratings: vec![4.8, 4.5],
            ..Default::default()
        };
        let kept = filter_restaurants(&all, &filter);
        assert!(kept.iter().all(|r| r.rating >= 4.5));
        assert_eq!(kept.len(), 6);
    }

    #[test]
    fn price_tiers() {
        assert_eq!(price_tier("$"), 1);
        assert_eq!(price_tier("$$$"), 3);
        assert_eq!(price_tier("$5-$15"), 2);
        assert_eq!(price_tier("$8-$15"), 2);
        assert_eq!(price_tier("$15-$25"), 3);
        assert_eq!(price_tier("$20-$40"), 4);
        assert_eq!(price_tier("$5-$9"), 1);
        assert_eq!(price_tier("12"), 2);
        assert_eq!(price_tier(""), 0);
        assert_eq!(price_tier("cheap"), 0);
    }

    #[test]
    fn sorts_are_stable() {
        let all = catalog();

        let low = sort_restaurants(&all, RestaurantSort::PriceLow);
        assert_eq!(low[0].name, "Burger Haven");
        assert_eq!(low[1].name, "Taco Time");
        assert_eq!(low.last().unwrap().name, "Sushi Supreme");

        let high = sort_restaurants(&all, RestaurantSort::PriceHigh);
        assert_eq!(high[0].name, "Sushi Supreme");

        let best = sort_restaurants(&all, RestaurantSort::RatingDesc);
        assert_eq!(names(&best[..3]), vec!["Sushi Supreme", "Pizza Paradise", "Cafe Aroma"]);

        let worst = sort_restaurants(&all, RestaurantSort::RatingAsc);
        assert_eq!(worst[0].name, "Taco Time");

        assert_eq!(sort_restaurants(&all, RestaurantSort::Default), all);
    }

    #[test]
    fn sort_labels() {
        assert_eq!("rating-desc".parse::<RestaurantSort>(), Ok(RestaurantSort::RatingDesc));
        assert_eq!("bogus".parse::<RestaurantSort>(), Ok(RestaurantSort::Default));
        for sort in [RestaurantSort::PriceLow, RestaurantSort::PriceHigh, RestaurantSort::RatingAsc] {
            assert_eq!(sort.as_str().parse::<RestaurantSort>(), Ok(sort));
        }
    }
}
