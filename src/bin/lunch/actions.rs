use lunch_pick::{
    data::{Category, CategoryFilter, NewRestaurant, NewRestaurantBuilder, Restaurant, SortKey},
    Event, ListController, Snapshot, StorageAdapter,
};

pub(super) const USAGE: &str = "\
Usage:
  lunch list [category] [name|distance]
  lunch favorites
  lunch show <id>
  lunch favorite <id>
  lunch add <category> <name> <distance> [link] [description...]";

#[derive(Debug)]
pub(super) enum Action {
    List {
        category: CategoryFilter,
        sort: Option<SortKey>,
    },
    Favorites,
    Show(u32),
    Favorite(u32),
    Add(NewRestaurant),
}

fn parse_id(arg: Option<&&str>) -> Result<u32, &'static str> {
    let Some(arg) = arg else {
        return Err("too less argument");
    };
    arg.parse().map_err(|_| "Can not parse your argument into number")
}

impl Action {
    // args[0] is the command, the program name is already stripped
    pub(super) fn new(args: &[&str]) -> Result<Self, &'static str> {
        let Some(command) = args.first() else {
            return Err("missing command");
        };

        match *command {
            "list" => {
                let category = match args.get(1) {
                    Some(category) => category.parse()?,
                    None => CategoryFilter::All,
                };
                let sort = args.get(2).map(|sort| sort.parse::<SortKey>()).transpose()?;
                Ok(Self::List { category, sort })
            }
            "favorites" => Ok(Self::Favorites),
            "show" => Ok(Self::Show(parse_id(args.get(1))?)),
            "favorite" => Ok(Self::Favorite(parse_id(args.get(1))?)),
            "add" => {
                if args.len() < 4 {
                    return Err("too less argument");
                }
                let category: Category = args[1].parse()?;
                let Ok(distance) = args[3].parse::<u32>() else {
                    return Err("distance must be a number of minutes");
                };

                let mut builder = NewRestaurantBuilder::default();
                builder.category(category).name(args[2]).distance(distance);
                if let Some(link) = args.get(4) {
                    builder.link(*link);
                }
                if args.len() > 5 {
                    builder.description(args[5..].join(" "));
                }
                // every required field is set, only the name check can fail
                let new = builder.build().map_err(|_| "restaurant name is empty")?;
                Ok(Self::Add(new))
            }
            _ => Err("unexpected action"),
        }
    }

    // consumed the action
    pub(super) async fn run<S: StorageAdapter>(
        self,
        controller: &mut ListController<S, Snapshot>,
    ) -> anyhow::Result<String> {
        let output = match self {
            Self::List { category, sort } => {
                controller.handle(Event::CategoryChanged(category)).await?;
                if let Some(sort) = sort {
                    controller.handle(Event::SortChanged(sort)).await?;
                }
                lines(&controller.renderer().restaurant_list)
            }
            Self::Favorites => lines(&controller.renderer().favorite_list),
            Self::Show(id) => {
                controller.handle(Event::ItemClicked(id)).await?;
                match controller.renderer_mut().take_detail() {
                    Some(restaurant) => detail(&restaurant),
                    None => format!("Incorrect id, no restaurant found: {id}"),
                }
            }
            Self::Favorite(id) => match controller.toggle_favorite(id).await? {
                Some(true) => format!("Marked {id} as favorite."),
                Some(false) => format!("Removed {id} from favorites."),
                None => format!("Incorrect id, no restaurant found: {id}"),
            },
            Self::Add(new) => {
                let id = controller.add_restaurant(new).await?;
                format!("Added. id: {id}")
            }
        };

        Ok(output)
    }
}

fn line(restaurant: &Restaurant) -> String {
    let star = if restaurant.favorite { " ★" } else { "" };
    format!(
        "{}. [{}] {} ({} min){star}",
        restaurant.id, restaurant.category, restaurant.name, restaurant.distance
    )
}

fn lines(restaurants: &[Restaurant]) -> String {
    if restaurants.is_empty() {
        return "No restaurant yet.".to_string();
    }
    restaurants
        .iter()
        .map(line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn detail(restaurant: &Restaurant) -> String {
    let mut text = line(restaurant);
    if let Some(description) = &restaurant.description {
        text.push_str(&format!("\n\n{description}"));
    }
    if let Some(link) = &restaurant.link {
        text.push_str(&format!("\n{link}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunch_pick::{store::KEY, MemoryStorage};

    const SEED: &str = r#"[
        {"id":1,"name":"Bob","distance":5,"category":"한식","favorite":false,"description":"국밥"},
        {"id":2,"name":"Al","distance":2,"category":"중식","favorite":true}
    ]"#;

    async fn controller() -> ListController<MemoryStorage, Snapshot> {
        let storage = MemoryStorage::with_entry(KEY, SEED);
        ListController::init(storage, Snapshot::default(), SortKey::Name)
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_actions() {
        assert!(matches!(
            Action::new(&["list", "한식", "distance"]),
            Ok(Action::List {
                category: CategoryFilter::Only(Category::Korean),
                sort: Some(SortKey::Distance)
            })
        ));
        assert!(matches!(Action::new(&["favorite", "7"]), Ok(Action::Favorite(7))));
        assert!(Action::new(&["show", "seven"]).is_err());
        assert!(Action::new(&["add", "한식", "Bob"]).is_err());
        assert!(Action::new(&["add", "한식", " ", "5"]).is_err());
        assert!(Action::new(&["delete", "1"]).is_err());
        assert!(Action::new(&[]).is_err());
    }

    #[tokio::test]
    async fn test_run_list_and_show() {
        let mut controller = controller().await;

        let output = Action::new(&["list", "all", "distance"])
            .unwrap()
            .run(&mut controller)
            .await
            .unwrap();
        assert_eq!(output, "2. [중식] Al (2 min) ★\n1. [한식] Bob (5 min)");

        let output = Action::new(&["show", "1"])
            .unwrap()
            .run(&mut controller)
            .await
            .unwrap();
        assert_eq!(output, "1. [한식] Bob (5 min)\n\n국밥");
    }

    #[tokio::test]
    async fn test_run_add_and_favorite() {
        let mut controller = controller().await;

        let output = Action::new(&["add", "korean", "Cha", "3", "", "good", "noodles"])
            .unwrap()
            .run(&mut controller)
            .await
            .unwrap();
        assert_eq!(output, "Added. id: 3");
        let added = controller.store().find(3).unwrap();
        assert_eq!(added.link, None);
        assert_eq!(added.description.as_deref(), Some("good noodles"));

        let output = Action::new(&["favorite", "3"])
            .unwrap()
            .run(&mut controller)
            .await
            .unwrap();
        assert_eq!(output, "Marked 3 as favorite.");

        let output = Action::Favorites.run(&mut controller).await.unwrap();
        assert_eq!(output, "2. [중식] Al (2 min) ★\n3. [한식] Cha (3 min) ★");
    }
}
