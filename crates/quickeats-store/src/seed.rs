//! Fixture catalog loaded by `setup_db`.
//!
//! Both backends insert [`restaurants`] in order, then insert [`menus`] for the
//! stored rows so menu items point at whatever ids the backend assigned.
//! Restaurants without a dedicated menu get [`fallback_menu`].

use crate::model::{MenuItemCreate, Restaurant, RestaurantCreate, RestaurantId};

pub const RESTAURANT_COUNT: usize = 8;

const UNSPLASH_QUERY: &str =
    "ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop";

fn photo(slug: &str, width: u32) -> String {
    format!("https://images.unsplash.com/{slug}?{UNSPLASH_QUERY}&w={width}&q=80")
}

fn premium_photo(slug: &str, width: u32) -> String {
    format!("https://plus.unsplash.com/{slug}?{UNSPLASH_QUERY}&w={width}&q=80")
}

#[allow(clippy::too_many_arguments)]
fn restaurant(
    name: &str,
    description: &str,
    image: String,
    cuisine: &[&str],
    price_range: &str,
    rating: f64,
    address: &str,
    delivery_time: u32,
    drone_delivery_available: bool,
    featured: bool,
) -> RestaurantCreate {
    RestaurantCreate {
        name: name.to_string(),
        description: description.to_string(),
        image,
        cuisine: cuisine.iter().map(|c| c.to_string()).collect(),
        price_range: price_range.to_string(),
        rating,
        address: address.to_string(),
        delivery_time,
        drone_delivery_available,
        featured,
    }
}

/// The fixture restaurants, in insertion order.
pub fn restaurants() -> Vec<RestaurantCreate> {
    vec![
        restaurant(
            "Burger Haven",
            "Best burgers in town with premium ingredients and chef-crafted recipes.",
            photo("photo-1568901346375-23c9450c58cd", 1602),
            &["American", "Fast Food"],
            "$10-$20",
            4.5,
            "123 Main St, New York, NY",
            30,
            true,
            true,
        ),
        restaurant(
            "Pizza Paradise",
            "Authentic Italian pizzas made with traditional recipes and imported ingredients.",
            photo("photo-1565299624946-b28f40a0ae38", 1598),
            &["Italian", "Pizza"],
            "$15-$25",
            4.7,
            "456 Pizza Ave, New York, NY",
            25,
            true,
            true,
        ),
        restaurant(
            "Sushi Supreme",
            "Premium sushi and Japanese cuisine prepared by expert chefs.",
            photo("photo-1579871494447-9811cf80d66c", 1740),
            &["Japanese", "Sushi"],
            "$20-$40",
            4.8,
            "789 Sushi St, New York, NY",
            35,
            false,
            true,
        ),
        restaurant(
            "Taco Time",
            "Authentic Mexican street food with homemade salsa and fresh ingredients.",
            photo("photo-1565299585323-38d6b0865b47", 1480),
            &["Mexican", "Fast Food"],
            "$8-$15",
            4.3,
            "101 Taco Rd, New York, NY",
            20,
            true,
            false,
        ),
        restaurant(
            "Pasta Palace",
            "Fresh homemade pasta and Italian specialties in a cozy atmosphere.",
            photo("photo-1563379926898-05f4575a45d8", 1740),
            &["Italian", "Pasta"],
            "$15-$30",
            4.6,
            "222 Pasta Ln, New York, NY",
            40,
            false,
            false,
        ),
        restaurant(
            "Jersey Mike's",
            "Premium sub sandwiches made fresh to order with high-quality ingredients.",
            photo("photo-1509722747041-616f39b57569", 1740),
            &["American", "Sandwiches"],
            "$8-$15",
            4.4,
            "1001 Morris Ave, Union, NJ",
            25,
            true,
            true,
        ),
        restaurant(
            "Thai Delight",
            "Authentic Thai cuisine with fresh ingredients and traditional recipes from Bangkok.",
            photo("photo-1569562211093-4ed0d0758f12", 1740),
            &["Thai", "Asian"],
            "$12-$25",
            4.6,
            "222 Stuyvesant Ave, Union, NJ",
            35,
            false,
            true,
        ),
        restaurant(
            "Cafe Aroma",
            "Cozy cafe offering specialty coffee, breakfast, pastries, and light lunch options.",
            photo("photo-1559925393-8be0ec4767c8", 1741),
            &["Cafe", "Breakfast", "Desserts"],
            "$5-$15",
            4.7,
            "500 Chestnut St, Union, NJ",
            20,
            true,
            false,
        ),
    ]
}

fn item(
    restaurant_id: RestaurantId,
    name: &str,
    description: &str,
    price: f64,
    image: String,
    category: &str,
    popular: bool,
) -> MenuItemCreate {
    MenuItemCreate {
        restaurant_id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        image,
        category: category.to_string(),
        popular,
    }
}

/// Every menu item for `restaurants`, in restaurant order then menu order.
pub fn menus(restaurants: &[Restaurant]) -> Vec<MenuItemCreate> {
    restaurants.iter().flat_map(menu_for).collect()
}

/// Menu items for a stored restaurant, chosen by its name.
pub fn menu_for(restaurant: &Restaurant) -> Vec<MenuItemCreate> {
    let id = restaurant.id;
    match restaurant.name.as_str() {
        "Burger Haven" => vec![
            item(id, "Classic Burger", "100% beef patty with fresh vegetables and our special sauce", 12.99, photo("photo-1568901346375-23c9450c58cd", 1602), "Burgers", true),
            item(id, "Cheese Burger", "Our classic burger topped with cheddar cheese", 14.99, photo("photo-1572802419224-296b0aeee0d9", 1740), "Burgers", true),
            item(id, "French Fries", "Crispy golden fries with sea salt", 5.99, photo("photo-1576107232684-1285f173d114", 1740), "Sides", false),
        ],
        "Pizza Paradise" => vec![
            item(id, "Margherita Pizza", "Classic pizza with tomato sauce, mozzarella, and basil", 15.99, photo("photo-1565299624946-b28f40a0ae38", 1598), "Pizzas", true),
            item(id, "Pepperoni Pizza", "Margherita pizza topped with pepperoni slices", 17.99, photo("photo-1628840042765-356cda07504e", 1480), "Pizzas", true),
            item(id, "Garlic Bread", "Freshly baked bread with garlic butter", 6.99, premium_photo("premium_photo-1668618296300-37256b19f540", 1740), "Sides", false),
        ],
        "Jersey Mike's" => vec![
            item(id, "Original Italian", "Provolone, ham, prosciuttini, cappacuolo, salami, and pepperoni with onions, lettuce, tomatoes, vinegar, oil and spices", 11.99, photo("photo-1509722747041-616f39b57569", 1740), "Cold Subs", true),
            item(id, "Club Supreme", "Turkey, bacon, and mayo with lettuce and tomatoes", 10.99, photo("photo-1550507992-eb63ffee0847", 1740), "Cold Subs", true),
            item(id, "Chipotle Chicken Cheesesteak", "Grilled chicken, pepper jack cheese with chipotle mayo", 12.99, photo("photo-1539252554873-9e918320f1b5", 1674), "Hot Subs", true),
            item(id, "Potato Chips", "Crispy kettle-cooked chips", 2.49, photo("photo-1613914153594-49047b5e96da", 1740), "Sides", false),
        ],
        "Thai Delight" => vec![
            item(id, "Pad Thai", "Stir-fried rice noodles with eggs, tofu, bean sprouts, peanuts in tamarind sauce", 15.99, photo("photo-1600314732556-c0c9b77b41d9", 1740), "Noodles", true),
            item(id, "Green Curry", "Coconut milk based curry with bamboo shoots, bell peppers, and basil leaves", 16.99, photo("photo-1569562211093-4ed0d0758f12", 1740), "Curry", true),
            item(id, "Thai Spring Rolls", "Crispy rolls filled with vegetables and glass noodles, served with sweet chili sauce", 8.99, photo("photo-1559847844-5315695dadae", 1740), "Appetizers", true),
            item(id, "Mango Sticky Rice", "Sweet sticky rice with fresh mango slices and coconut cream", 7.99, photo("photo-1621939814912-b5dad3bde9f6", 1740), "Desserts", false),
        ],
        "Cafe Aroma" => vec![
            item(id, "Avocado Toast", "Sourdough toast with mashed avocado, cherry tomatoes, and microgreens", 10.99, photo("photo-1588137378633-dea1336ce1e2", 1740), "Breakfast", true),
            item(id, "Cappuccino", "Espresso with steamed milk and foam", 4.99, photo("photo-1534778101976-62847782c213", 1740), "Beverages", true),
            item(id, "Chicken Pesto Sandwich", "Grilled chicken, pesto, roasted red peppers, and mozzarella on ciabatta bread", 12.99, photo("photo-1559304822-9eb2813c9844", 1936), "Lunch", true),
            item(id, "Chocolate Croissant", "Buttery flaky pastry filled with chocolate", 4.50, photo("photo-1600348759986-339eca7ee8ee", 1760), "Pastries", false),
        ],
        _ => fallback_menu(id),
    }
}

/// The generic two-item menu for restaurants without a dedicated one.
pub fn fallback_menu(restaurant_id: RestaurantId) -> Vec<MenuItemCreate> {
    vec![
        item(restaurant_id, "Signature Dish", "Our most popular and delicious specialty", 14.99, photo("photo-1546069901-ba9599a7e63c", 1760), "Main Course", true),
        item(restaurant_id, "Side Dish", "Perfect accompaniment to any meal", 7.99, photo("photo-1567620832903-9fc6debc209f", 1480), "Sides", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: u32, params: RestaurantCreate) -> Restaurant {
        Restaurant::from_create(RestaurantId(id), params)
    }

    #[test]
    fn eight_restaurants_in_fixed_order() {
        let names: Vec<String> = restaurants().into_iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Burger Haven",
                "Pizza Paradise",
                "Sushi Supreme",
                "Taco Time",
                "Pasta Palace",
                "Jersey Mike's",
                "Thai Delight",
                "Cafe Aroma",
            ]
        );
        assert_eq!(restaurants().len(), RESTAURANT_COUNT);
    }

    #[test]
    fn menus_reference_the_stored_restaurant() {
        let menus: Vec<(String, Vec<MenuItemCreate>)> = restaurants()
            .into_iter()
            .enumerate()
            .map(|(i, params)| {
                let restaurant = stored(i as u32 + 10, params);
                (restaurant.name.clone(), menu_for(&restaurant))
            })
            .collect();

        let sizes: Vec<usize> = menus.iter().map(|(_, items)| items.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2, 2, 4, 4, 4]);
        assert_eq!(sizes.iter().sum::<usize>(), 24);

        for (i, (_, items)) in menus.iter().enumerate() {
            assert!(items
                .iter()
                .all(|item| item.restaurant_id == RestaurantId(i as u32 + 10)));
        }

        let sushi = &menus[2].1;
        assert_eq!(sushi[0].name, "Signature Dish");
        assert_eq!(sushi[0].category, "Main Course");
        assert_eq!(sushi[0].price, 14.99);
        assert_eq!(sushi[1].name, "Side Dish");
        assert_eq!(sushi[1].price, 7.99);
    }

    #[test]
    fn menus_follow_restaurant_order() {
        let stored: Vec<Restaurant> = restaurants()
            .into_iter()
            .enumerate()
            .map(|(i, params)| stored(i as u32 + 1, params))
            .collect();

        let items = menus(&stored);
        assert_eq!(items.len(), 24);
        assert_eq!(items[0].name, "Classic Burger");
        assert_eq!(items[23].name, "Chocolate Croissant");

        let owners: Vec<u32> = items.iter().map(|item| item.restaurant_id.0).collect();
        let mut sorted = owners.clone();
        sorted.sort_unstable();
        assert_eq!(owners, sorted);

        assert!(menus(&stored[2..3])
            .iter()
            .all(|item| item.restaurant_id == RestaurantId(3)));
        assert!(menus(&[]).is_empty());
    }

    #[test]
    fn fixtures_pass_boundary_validation() {
        for params in restaurants() {
            params.validate().unwrap();
            let restaurant = stored(1, params);
            for item in menu_for(&restaurant) {
                item.validate().unwrap();
            }
        }
    }

    #[test]
    fn image_urls_keep_their_query() {
        let burger = &restaurants()[0];
        assert_eq!(
            burger.image,
            "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=1602&q=80"
        );
    }
}
