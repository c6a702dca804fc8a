use crate::{
    data::{CategoryFilter, NewRestaurant, Restaurant, SortKey},
    render::{Mount, Render},
    storage::StorageAdapter,
    store::Store,
};

/// Something the user did to the list.
#[derive(Debug, Clone)]
pub enum Event {
    CategoryChanged(CategoryFilter),
    SortChanged(SortKey),
    ItemClicked(u32),
    FavoriteToggled(u32),
    RestaurantAdded(NewRestaurant),
}

/// Applies user events to the store, keeps storage in sync and repaints
/// through the renderer. The only writer of the store.
pub struct ListController<S, R> {
    store: Store,
    storage: S,
    renderer: R,
    category: CategoryFilter,
    sort: SortKey,
}

impl<S: StorageAdapter, R: Render> ListController<S, R> {
    /// Hydrate from storage and paint the initial list and favorites.
    pub async fn init(storage: S, renderer: R, sort: SortKey) -> anyhow::Result<Self> {
        let mut store = Store::default();
        store.load(&storage).await?;

        let mut controller = Self {
            store,
            storage,
            renderer,
            category: CategoryFilter::All,
            sort,
        };
        controller.repaint_list();
        controller.repaint_favorites();
        Ok(controller)
    }

    pub async fn handle(&mut self, event: Event) -> anyhow::Result<()> {
        tracing::debug!("handle {event:?}");
        match event {
            Event::CategoryChanged(category) => {
                self.category = category;
                self.repaint_list();
            }
            Event::SortChanged(sort) => {
                self.sort = sort;
                self.repaint_list();
            }
            Event::ItemClicked(id) => {
                if let Some(restaurant) = self.store.find(id) {
                    self.renderer.open_detail(restaurant);
                }
            }
            Event::FavoriteToggled(id) => {
                self.toggle_favorite(id).await?;
            }
            Event::RestaurantAdded(new) => {
                self.add_restaurant(new).await?;
            }
        }

        Ok(())
    }

    /// Flip the favorite flag of `id`. Returns the new flag, or `None` when
    /// no restaurant has that id.
    pub async fn toggle_favorite(&mut self, id: u32) -> anyhow::Result<Option<bool>> {
        let Some(restaurant) = self.store.find_mut(id) else {
            return Ok(None);
        };
        restaurant.favorite = !restaurant.favorite;
        let favorite = restaurant.favorite;

        if let Err(err) = self.store.save(&mut self.storage).await {
            // storage still holds the old flag
            if let Some(restaurant) = self.store.find_mut(id) {
                restaurant.favorite = !favorite;
            }
            return Err(err);
        }
        self.repaint_favorites();
        self.renderer.set_favorite_icon(id, favorite.into());
        tracing::info!("restaurant {id} favorite: {favorite}");
        Ok(Some(favorite))
    }

    /// Append a new restaurant and return its assigned id.
    pub async fn add_restaurant(&mut self, new: NewRestaurant) -> anyhow::Result<u32> {
        let id = self.store.add(new)?.id;
        if let Err(err) = self.store.save(&mut self.storage).await {
            self.store.pop();
            return Err(err);
        }
        self.repaint_list();
        self.repaint_favorites();
        tracing::info!("added restaurant {id}");
        Ok(id)
    }

    /// The current category view in the current sort order.
    pub fn selected_list(&self) -> Vec<&Restaurant> {
        select(&self.store, self.category, self.sort)
    }

    fn repaint_list(&mut self) {
        let list = select(&self.store, self.category, self.sort);
        self.renderer.clear(Mount::RestaurantList);
        for restaurant in list {
            self.renderer.render(restaurant, Mount::RestaurantList);
        }
    }

    fn repaint_favorites(&mut self) {
        self.renderer.clear(Mount::FavoriteList);
        for restaurant in self.store.favorites() {
            self.renderer.render(restaurant, Mount::FavoriteList);
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }
}

fn select(store: &Store, category: CategoryFilter, sort: SortKey) -> Vec<&Restaurant> {
    match category {
        CategoryFilter::All => sort.apply(store.restaurants()),
        CategoryFilter::Only(category) => sort.apply(store.filtered(category)),
    }
}
