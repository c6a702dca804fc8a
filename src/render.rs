use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{FavoriteIcon, Restaurant};

/// Named regions a renderer paints into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    RestaurantList,
    FavoriteList,
}

/// The view side of the list controller.
pub trait Render {
    fn clear(&mut self, mount: Mount);
    /// Append one restaurant to the end of `mount`.
    fn render(&mut self, restaurant: &Restaurant, mount: Mount);
    fn open_detail(&mut self, restaurant: &Restaurant);
    fn set_favorite_icon(&mut self, id: u32, icon: FavoriteIcon);
}

/// Keeps everything painted so far as plain data, ready to be serialized
/// or printed by a front-end.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Snapshot {
    pub restaurant_list: Vec<Restaurant>,
    pub favorite_list: Vec<Restaurant>,
    pub detail: Option<Restaurant>,
    pub icons: BTreeMap<u32, FavoriteIcon>,
}

impl Snapshot {
    fn mount_mut(&mut self, mount: Mount) -> &mut Vec<Restaurant> {
        match mount {
            Mount::RestaurantList => &mut self.restaurant_list,
            Mount::FavoriteList => &mut self.favorite_list,
        }
    }

    pub fn take_detail(&mut self) -> Option<Restaurant> {
        self.detail.take()
    }
}

impl Render for Snapshot {
    fn clear(&mut self, mount: Mount) {
        self.mount_mut(mount).clear();
        let (list, favorites) = (&self.restaurant_list, &self.favorite_list);
        self.icons
            .retain(|id, _| list.iter().chain(favorites).any(|r| r.id == *id));
    }

    fn render(&mut self, restaurant: &Restaurant, mount: Mount) {
        self.icons.insert(restaurant.id, restaurant.icon());
        self.mount_mut(mount).push(restaurant.clone());
    }

    fn open_detail(&mut self, restaurant: &Restaurant) {
        self.detail = Some(restaurant.clone());
    }

    fn set_favorite_icon(&mut self, id: u32, icon: FavoriteIcon) {
        // only painted restaurants have an icon
        if !self.icons.contains_key(&id) {
            return;
        }
        self.icons.insert(id, icon);
        // the list region shows a copy, keep its flag in step with the icon
        let favorite = icon == FavoriteIcon::Filled;
        if let Some(painted) = self.restaurant_list.iter_mut().find(|r| r.id == id) {
            painted.favorite = favorite;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Category;

    fn restaurant(id: u32, favorite: bool) -> Restaurant {
        Restaurant {
            id,
            category: Category::Other,
            name: format!("r{id}"),
            distance: id,
            favorite,
            link: None,
            description: None,
        }
    }

    #[test]
    fn test_snapshot_mounts() {
        let mut snapshot = Snapshot::default();
        snapshot.render(&restaurant(1, false), Mount::RestaurantList);
        snapshot.render(&restaurant(2, true), Mount::RestaurantList);
        snapshot.render(&restaurant(2, true), Mount::FavoriteList);
        assert_eq!(snapshot.restaurant_list.len(), 2);
        assert_eq!(snapshot.favorite_list.len(), 1);
        assert_eq!(snapshot.icons[&2], FavoriteIcon::Filled);

        snapshot.clear(Mount::RestaurantList);
        assert!(snapshot.restaurant_list.is_empty());
        assert_eq!(snapshot.favorite_list.len(), 1);
        // 2 is still painted as a favorite, 1 is gone everywhere
        assert!(!snapshot.icons.contains_key(&1));
        assert!(snapshot.icons.contains_key(&2));
    }

    #[test]
    fn test_icons_do_not_outlive_painted_restaurants() {
        let mut snapshot = Snapshot::default();
        for id in 1..=50 {
            snapshot.render(&restaurant(id, false), Mount::RestaurantList);
        }
        snapshot.clear(Mount::RestaurantList);
        snapshot.render(&restaurant(3, false), Mount::RestaurantList);
        assert_eq!(snapshot.icons.len(), 1);

        snapshot.set_favorite_icon(40, FavoriteIcon::Filled);
        assert!(!snapshot.icons.contains_key(&40));
    }

    #[test]
    fn test_icon_swap_updates_painted_copy() {
        let mut snapshot = Snapshot::default();
        snapshot.render(&restaurant(1, false), Mount::RestaurantList);
        snapshot.set_favorite_icon(1, FavoriteIcon::Filled);
        assert!(snapshot.restaurant_list[0].favorite);
        assert_eq!(FavoriteIcon::Filled.src(), "./favorite-icon-filled.png");
    }
}
