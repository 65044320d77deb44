//! Seed the database with starter data.
//!
//! Creates the catalog (categories and desserts), a few testimonials and
//! chef recommendations, and the CMS pages (About Us, Our Story, FAQ).
//! Safe to re-run: catalog seeding is skipped when categories already
//! exist (unless `--force`), and the CMS pages are saved as upserts.

use std::collections::HashMap;

use sqlx::PgPool;

use sweet_dessert_core::{CategoryId, Money};

use sweet_dessert_api::db::catalog::{CategoryInput, DessertInput};
use sweet_dessert_api::db::content::{
    AboutPageInput, AboutValueInput, FaqCategoryInput, FaqItemInput, FaqPageInput,
    ImpactMetricInput, StoryPageInput, TeamMemberInput, TimelineEventInput,
};
use sweet_dessert_api::db::{CatalogRepository, ContentRepository, RepositoryError};

struct DessertSeed {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    /// Price in minor units (paisa).
    price: i64,
    category: &'static str,
    dietary_info: &'static [&'static str],
    ingredients: &'static [&'static str],
    allergens: &'static [&'static str],
    preparation_minutes: i32,
    featured: bool,
    best_seller: bool,
}

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Cakes", "cakes", "Rich and decadent cakes for special occasions"),
    ("Pastries", "pastries", "Delicate French-inspired pastries and tarts"),
    ("Cookies", "cookies", "Fresh baked cookies and brownies"),
    ("Cupcakes", "cupcakes", "Individual sized cupcakes with creative flavors"),
    ("Ice Cream", "ice-cream", "Premium ice cream and frozen desserts"),
    (
        "Healthy Options",
        "healthy-options",
        "Guilt-free desserts for health-conscious customers",
    ),
];

const DESSERTS: &[DessertSeed] = &[
    DessertSeed {
        name: "Chocolate Lava Cake",
        slug: "chocolate-lava-cake",
        description: "Decadent chocolate cake with a molten chocolate center, served warm with vanilla ice cream",
        price: 45000,
        category: "Cakes",
        dietary_info: &["vegetarian"],
        ingredients: &["chocolate", "eggs", "butter", "flour", "sugar"],
        allergens: &["eggs", "gluten", "dairy"],
        preparation_minutes: 25,
        featured: true,
        best_seller: true,
    },
    DessertSeed {
        name: "Strawberry Cheesecake",
        slug: "strawberry-cheesecake",
        description: "Creamy New York style cheesecake topped with fresh strawberries and strawberry glaze",
        price: 38000,
        category: "Cakes",
        dietary_info: &["vegetarian"],
        ingredients: &["cream cheese", "strawberries", "graham crackers", "sugar"],
        allergens: &["eggs", "gluten", "dairy"],
        preparation_minutes: 45,
        featured: true,
        best_seller: false,
    },
    DessertSeed {
        name: "Macarons Assorted",
        slug: "macarons-assorted",
        description: "French macarons in various flavors: vanilla, chocolate, raspberry, and pistachio",
        price: 65000,
        category: "Pastries",
        dietary_info: &["vegetarian", "gluten-free"],
        ingredients: &["almond flour", "sugar", "eggs"],
        allergens: &["eggs", "nuts"],
        preparation_minutes: 60,
        featured: false,
        best_seller: true,
    },
    DessertSeed {
        name: "Tiramisu",
        slug: "tiramisu",
        description: "Classic Italian dessert with coffee-soaked ladyfingers and mascarpone cream",
        price: 42000,
        category: "Pastries",
        dietary_info: &["vegetarian"],
        ingredients: &["mascarpone", "coffee", "ladyfingers", "cocoa", "eggs"],
        allergens: &["eggs", "gluten", "dairy"],
        preparation_minutes: 30,
        featured: true,
        best_seller: false,
    },
    DessertSeed {
        name: "Chocolate Chip Cookies",
        slug: "chocolate-chip-cookies",
        description: "Fresh baked chocolate chip cookies, soft and chewy with premium chocolate chips",
        price: 12000,
        category: "Cookies",
        dietary_info: &["vegetarian"],
        ingredients: &["flour", "chocolate chips", "butter", "sugar", "eggs"],
        allergens: &["eggs", "gluten", "dairy"],
        preparation_minutes: 15,
        featured: false,
        best_seller: true,
    },
    DessertSeed {
        name: "Red Velvet Cupcake",
        slug: "red-velvet-cupcake",
        description: "Moist red velvet cupcake with cream cheese frosting",
        price: 18000,
        category: "Cupcakes",
        dietary_info: &["vegetarian"],
        ingredients: &["flour", "cocoa", "cream cheese", "butter", "sugar"],
        allergens: &["eggs", "gluten", "dairy"],
        preparation_minutes: 20,
        featured: false,
        best_seller: false,
    },
    DessertSeed {
        name: "Pistachio Kulfi",
        slug: "pistachio-kulfi",
        description: "Traditional frozen dessert made with slow-reduced milk and crushed pistachios",
        price: 35000,
        category: "Ice Cream",
        dietary_info: &["vegetarian"],
        ingredients: &["milk", "pistachio", "cardamom", "sugar"],
        allergens: &["nuts", "dairy"],
        preparation_minutes: 10,
        featured: true,
        best_seller: false,
    },
    DessertSeed {
        name: "Vegan Chocolate Mousse",
        slug: "vegan-chocolate-mousse",
        description: "Rich and creamy chocolate mousse made with avocado and cocoa, completely plant-based",
        price: 32000,
        category: "Healthy Options",
        dietary_info: &["vegan", "gluten-free"],
        ingredients: &["avocado", "cocoa", "maple syrup", "coconut cream"],
        allergens: &[],
        preparation_minutes: 15,
        featured: false,
        best_seller: false,
    },
];

/// Seed the database.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    seed_catalog(&pool, force).await?;
    seed_social_proof(&pool).await?;
    seed_cms(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_catalog(pool: &PgPool, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogRepository::new(pool);

    let existing = catalog.list_categories().await?;
    if !existing.is_empty() && !force {
        tracing::info!(
            "Catalog already has {} categories, skipping (use --force to seed anyway)",
            existing.len()
        );
        return Ok(());
    }

    for (name, slug, description) in CATEGORIES {
        let input = CategoryInput {
            name: (*name).to_string(),
            slug: (*slug).to_string(),
            description: (*description).to_string(),
            image: String::new(),
            display_order: 0,
        };
        match catalog.create_category(&input).await {
            Ok(category) => tracing::info!("Created category: {}", category.name),
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!("Category {} already exists", name);
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Re-read so conflict-skipped categories still resolve to their ids.
    let categories: HashMap<String, CategoryId> = catalog
        .list_categories()
        .await?
        .into_iter()
        .map(|c| (c.name, c.id))
        .collect();

    for seed in DESSERTS {
        let Some(&category_id) = categories.get(seed.category) else {
            tracing::warn!("Unknown category {} for {}, skipping", seed.category, seed.name);
            continue;
        };

        let input = DessertInput {
            name: seed.name.to_string(),
            slug: seed.slug.to_string(),
            description: seed.description.to_string(),
            price: Money::from_minor_units(seed.price),
            category_id,
            image: String::new(),
            dietary_info: to_strings(seed.dietary_info),
            ingredients: to_strings(seed.ingredients),
            allergens: to_strings(seed.allergens),
            preparation_minutes: seed.preparation_minutes,
            featured: seed.featured,
            seasonal: false,
            best_seller: seed.best_seller,
            available: true,
        };
        match catalog.create_dessert(&input).await {
            Ok(dessert) => tracing::info!("Created dessert: {}", dessert.name),
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!("Dessert {} already exists", seed.name);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

async fn seed_social_proof(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogRepository::new(pool);

    if catalog.list_testimonials(false).await?.is_empty() {
        let testimonials = [
            (
                "Sarah Ahmed",
                5,
                "Absolutely amazing desserts! The chocolate cake was divine and the presentation was beautiful. Will definitely order again!",
            ),
            (
                "Ali Hassan",
                5,
                "Best desserts in the city! The quality is outstanding and the flavors are incredible. Highly recommend to everyone.",
            ),
            (
                "Fatima Khan",
                4,
                "Ordered the macarons for a birthday party and everyone loved them. Delivery was right on time too.",
            ),
        ];
        for (name, rating, text) in testimonials {
            catalog
                .create_testimonial(name, "", rating, text, None, true)
                .await?;
        }
        tracing::info!("Created {} testimonials", testimonials.len());
    }

    if catalog.list_recommendations(false).await?.is_empty() {
        catalog
            .create_recommendation(
                "Chef Amara",
                "Head Pastry Chef",
                "",
                "The chocolate lava cake is our signature for a reason: a crisp shell, a molten center, and just enough bitterness to balance the sweetness.",
                None,
                true,
            )
            .await?;
        tracing::info!("Created chef recommendation");
    }

    Ok(())
}

async fn seed_cms(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let content = ContentRepository::new(pool);

    content
        .save_about_page(&AboutPageInput {
            hero_title: "About Sweet Dessert".to_string(),
            hero_subtitle: "Handcrafted desserts made fresh every day".to_string(),
            hero_badge: "Since 2018".to_string(),
            mission_title: "Our Mission".to_string(),
            mission_text: "To bring joy to every celebration with desserts made from honest ingredients and a lot of care.".to_string(),
            values_title: "What We Stand For".to_string(),
            values_subtitle: "The values behind every bake".to_string(),
            store_title: "Visit Our Store".to_string(),
            store_description: "Stop by for a coffee and something sweet.".to_string(),
            store_address: "42 Mall Road, Lahore".to_string(),
            store_hours: "Mon-Thu 7AM-9PM, Fri-Sun 7AM-10PM".to_string(),
            cta_title: "Ready for something sweet?".to_string(),
            cta_subtitle: "Browse the menu or talk to our assistant to place an order.".to_string(),
            values: vec![
                AboutValueInput {
                    title: "Fresh Every Day".to_string(),
                    description: "Everything is baked the morning it is sold.".to_string(),
                    icon: "Sunrise".to_string(),
                    color_gradient: "from-orange-400 to-pink-400".to_string(),
                },
                AboutValueInput {
                    title: "Honest Ingredients".to_string(),
                    description: "Real butter, real chocolate, no shortcuts.".to_string(),
                    icon: "Leaf".to_string(),
                    color_gradient: "from-green-400 to-teal-400".to_string(),
                },
            ],
            team_members: vec![
                TeamMemberInput {
                    name: "Amara Siddiqui".to_string(),
                    role: "Head Pastry Chef".to_string(),
                    description: "Trained in Paris, obsessed with laminated dough.".to_string(),
                    image_emoji: "👩‍🍳".to_string(),
                },
                TeamMemberInput {
                    name: "Bilal Raza".to_string(),
                    role: "Store Manager".to_string(),
                    description: "Keeps the counter stocked and the coffee hot.".to_string(),
                    image_emoji: "🧑‍💼".to_string(),
                },
            ],
        })
        .await?;
    tracing::info!("Saved About Us page");

    content
        .save_story_page(&StoryPageInput {
            hero_title: "Our Story".to_string(),
            hero_subtitle: "From a home kitchen to the city's favorite dessert shop".to_string(),
            hero_badge: "Est. 2018".to_string(),
            founder_name: "Noor Fatima".to_string(),
            founder_title: "Founder & Baker".to_string(),
            founder_image: String::new(),
            founder_quote: "I started with one oven and a recipe book from my grandmother.".to_string(),
            founder_description: "Noor began baking for neighbors and friends; three years later the first storefront opened.".to_string(),
            journey_title: "The Journey".to_string(),
            journey_subtitle: "A few milestones along the way".to_string(),
            impact_title: "By The Numbers".to_string(),
            impact_subtitle: "What we have baked so far".to_string(),
            vision_title: "Where We're Going".to_string(),
            vision_text: "More counters, more classes, and a dessert for every occasion.".to_string(),
            cta_title: "Taste the story".to_string(),
            cta_subtitle: "Order online or visit the store.".to_string(),
            timeline: vec![
                TimelineEventInput {
                    year: "2018".to_string(),
                    title: "First Orders".to_string(),
                    description: "Home-kitchen bakes for friends and neighbors.".to_string(),
                    icon: "Home".to_string(),
                    color_gradient: "from-orange-400 to-pink-400".to_string(),
                },
                TimelineEventInput {
                    year: "2021".to_string(),
                    title: "The Storefront".to_string(),
                    description: "Opened the first shop on Mall Road.".to_string(),
                    icon: "Store".to_string(),
                    color_gradient: "from-pink-400 to-purple-400".to_string(),
                },
                TimelineEventInput {
                    year: "2024".to_string(),
                    title: "Online Ordering".to_string(),
                    description: "Launched delivery, pickup, and the chat assistant.".to_string(),
                    icon: "Globe".to_string(),
                    color_gradient: "from-purple-400 to-blue-400".to_string(),
                },
            ],
            impact_metrics: vec![
                ImpactMetricInput {
                    number: "50,000+".to_string(),
                    label: "Happy Customers".to_string(),
                    icon: "Smile".to_string(),
                },
                ImpactMetricInput {
                    number: "120+".to_string(),
                    label: "Dessert Recipes".to_string(),
                    icon: "BookOpen".to_string(),
                },
            ],
        })
        .await?;
    tracing::info!("Saved Our Story page");

    content
        .save_faq_page(&FaqPageInput {
            title: "Frequently Asked Questions".to_string(),
            subtitle: "Find answers to commonly asked questions about our desserts, ordering, and services.".to_string(),
            categories: vec![
                FaqCategoryInput {
                    name: "Ordering & Payment".to_string(),
                    description: "Questions about placing orders and payment methods".to_string(),
                    icon: "CreditCard".to_string(),
                    color: "orange".to_string(),
                    is_active: true,
                    items: vec![
                        FaqItemInput {
                            question: "How far in advance should I place a custom cake order?".to_string(),
                            answer: "For custom cakes, we recommend placing your order at least 3-5 days in advance. For wedding cakes or large events, please contact us 2-3 weeks ahead.".to_string(),
                            is_active: true,
                        },
                        FaqItemInput {
                            question: "What payment methods do you accept?".to_string(),
                            answer: "We accept all major credit and debit cards through our secure online checkout, or you can pay at the store on pickup.".to_string(),
                            is_active: true,
                        },
                        FaqItemInput {
                            question: "Can I modify or cancel my order?".to_string(),
                            answer: "Orders can be modified or cancelled up to 2 hours before the scheduled pickup or delivery time. For custom cakes, changes must be made at least 24 hours in advance.".to_string(),
                            is_active: true,
                        },
                    ],
                },
                FaqCategoryInput {
                    name: "Delivery & Pickup".to_string(),
                    description: "Information about delivery options and pickup times".to_string(),
                    icon: "Truck".to_string(),
                    color: "blue".to_string(),
                    is_active: true,
                    items: vec![
                        FaqItemInput {
                            question: "What are your delivery options and fees?".to_string(),
                            answer: "We deliver within a 15-mile radius. A flat delivery fee applies, waived for orders above the free-delivery threshold shown at checkout.".to_string(),
                            is_active: true,
                        },
                        FaqItemInput {
                            question: "What are your pickup hours?".to_string(),
                            answer: "Pickup is available during regular business hours: Monday-Thursday 7AM-9PM, Friday-Sunday 7AM-10PM.".to_string(),
                            is_active: true,
                        },
                    ],
                },
                FaqCategoryInput {
                    name: "Dietary Requirements".to_string(),
                    description: "Questions about allergies and special dietary needs".to_string(),
                    icon: "Heart".to_string(),
                    color: "green".to_string(),
                    is_active: true,
                    items: vec![
                        FaqItemInput {
                            question: "Do you offer vegan or gluten-free desserts?".to_string(),
                            answer: "Yes! Our Healthy Options category includes vegan and gluten-free choices, and every product page lists dietary information and allergens.".to_string(),
                            is_active: true,
                        },
                        FaqItemInput {
                            question: "How do you handle allergen information?".to_string(),
                            answer: "Every dessert lists its ingredients and allergens. Our kitchen does handle nuts, gluten, dairy, and eggs, so trace amounts are possible.".to_string(),
                            is_active: true,
                        },
                    ],
                },
            ],
        })
        .await?;
    tracing::info!("Saved FAQ page");

    Ok(())
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
