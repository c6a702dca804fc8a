use std::collections::HashSet;

use anyhow::Context;

use crate::{
    data::{Category, NewRestaurant, Restaurant},
    storage::StorageAdapter,
};

/// Storage key the whole restaurant list is kept under.
pub const KEY: &str = "restaurants";

/// Owner of the canonical restaurant list.
#[derive(Debug, Default, Clone)]
pub struct Store {
    restaurants: Vec<Restaurant>,
}

impl Store {
    /// Install a serialized list. Anything that is not a JSON array of
    /// restaurants with distinct ids leaves the store empty.
    pub fn set_restaurant_list(&mut self, raw: Option<&str>) {
        self.restaurants = raw.map(parse_list).unwrap_or_default();
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn favorites(&self) -> Vec<&Restaurant> {
        self.restaurants.iter().filter(|r| r.favorite).collect()
    }

    pub fn filtered(&self, category: Category) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn find(&self, id: u32) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn find_mut(&mut self, id: u32) -> Option<&mut Restaurant> {
        self.restaurants.iter_mut().find(|r| r.id == id)
    }

    /// `None` once the largest id is `u32::MAX`.
    pub fn next_id(&self) -> Option<u32> {
        match self.restaurants.iter().map(|r| r.id).max() {
            Some(id) => id.checked_add(1),
            None => Some(1),
        }
    }

    pub fn add(&mut self, new: NewRestaurant) -> anyhow::Result<&Restaurant> {
        let id = self
            .next_id()
            .context("no restaurant id left, the largest id is already taken")?;
        self.restaurants.push(new.into_restaurant(id));
        Ok(&self.restaurants[self.restaurants.len() - 1])
    }

    /// Drop the most recently added restaurant.
    pub(crate) fn pop(&mut self) -> Option<Restaurant> {
        self.restaurants.pop()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(&self.restaurants).with_context(|| "fail to serialize restaurants")
    }

    /// Hydrate from `storage`. Only a failing storage backend is an error.
    pub async fn load<S>(&mut self, storage: &S) -> anyhow::Result<()>
    where
        S: StorageAdapter + ?Sized,
    {
        let raw = storage.get(KEY).await?;
        self.set_restaurant_list(raw.as_deref());
        tracing::info!("loaded {} restaurants", self.restaurants.len());
        Ok(())
    }

    pub async fn save<S>(&self, storage: &mut S) -> anyhow::Result<()>
    where
        S: StorageAdapter + ?Sized,
    {
        let raw = self.to_json()?;
        storage.set(KEY, &raw).await
    }
}

fn parse_list(raw: &str) -> Vec<Restaurant> {
    let list: Vec<Restaurant> = match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("ignore malformed restaurant list: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    if list.iter().all(|r| seen.insert(r.id)) {
        list
    } else {
        tracing::warn!("ignore restaurant list with duplicated id");
        Vec::new()
    }
}
