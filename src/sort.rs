//! Display ordering for restaurant views.
//!
//! Both sorts are stable and return a fresh sequence of references, so the
//! store's canonical order is never touched.

use crate::data::{Restaurant, SortKey};

pub fn sort_by_name<'a, I>(list: I) -> Vec<&'a Restaurant>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut sorted: Vec<_> = list.into_iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

pub fn sort_by_distance<'a, I>(list: I) -> Vec<&'a Restaurant>
where
    I: IntoIterator<Item = &'a Restaurant>,
{
    let mut sorted: Vec<_> = list.into_iter().collect();
    sorted.sort_by_key(|restaurant| restaurant.distance);
    sorted
}

impl SortKey {
    pub fn apply<'a, I>(self, list: I) -> Vec<&'a Restaurant>
    where
        I: IntoIterator<Item = &'a Restaurant>,
    {
        match self {
            Self::Name => sort_by_name(list),
            Self::Distance => sort_by_distance(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Category;

    fn restaurant(id: u32, name: &str, distance: u32) -> Restaurant {
        Restaurant {
            id,
            category: Category::Korean,
            name: name.to_string(),
            distance,
            favorite: false,
            link: None,
            description: None,
        }
    }

    fn ids(list: &[&Restaurant]) -> Vec<u32> {
        list.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let list = vec![restaurant(1, "Bob", 5), restaurant(2, "Al", 2)];
        let sorted = sort_by_name(&list);
        assert_eq!(ids(&sorted), vec![2, 1]);
        // input order is untouched
        assert_eq!(list[0].id, 1);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let list = vec![
            restaurant(1, "김밥천국", 10),
            restaurant(2, "Burger", 3),
            restaurant(3, "Al", 10),
            restaurant(4, "Burger", 1),
        ];

        let once = sort_by_name(&list);
        let twice = sort_by_name(once.iter().copied());
        assert_eq!(ids(&once), ids(&twice));

        let once = sort_by_distance(&list);
        let twice = sort_by_distance(once.iter().copied());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_sort_by_distance_is_stable() {
        let list = vec![
            restaurant(1, "a", 10),
            restaurant(2, "b", 5),
            restaurant(3, "c", 10),
            restaurant(4, "d", 5),
            restaurant(5, "e", 10),
        ];
        assert_eq!(ids(&sort_by_distance(&list)), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_sort_key_apply() {
        let list = vec![restaurant(1, "b", 1), restaurant(2, "a", 2)];
        assert_eq!(ids(&SortKey::Name.apply(&list)), vec![2, 1]);
        assert_eq!(ids(&SortKey::Distance.apply(&list)), vec![1, 2]);
        assert!(SortKey::Name.apply(Vec::new()).is_empty());
    }
}
