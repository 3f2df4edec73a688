use crate::domain::product::{Product, ProductId};

/// Static seed for the built-in Zen Botanica collection.
#[derive(Debug, Clone, Copy)]
struct TeaSeed {
    id: u32,
    name: &'static str,
    description: &'static str,
    price: &'static str,
    original_price: &'static str,
    image: &'static str,
    benefits: &'static [&'static str],
    rating: f64,
    reviews: u32,
    brewing_time: &'static str,
    temperature: &'static str,
    ingredients: &'static [&'static str],
    origin: &'static str,
    in_stock: bool,
    tags: &'static [&'static str],
    guide_benefits: &'static [&'static str],
}

const TEA_SEEDS: &[TeaSeed] = &[
    TeaSeed {
        id: 1,
        name: "Tranquil Evening Blend",
        description: "Chamomile, lavender, and lemon balm for peaceful nights",
        price: "$24.99",
        original_price: "$29.99",
        image: "/elegant-tea-package-with-chamomile-flowers.png",
        benefits: &["Promotes relaxation", "Improves sleep quality", "Reduces anxiety"],
        rating: 4.8,
        reviews: 127,
        brewing_time: "5-7 min",
        temperature: "85°C",
        ingredients: &["Chamomile", "Lavender", "Lemon Balm", "Passionflower"],
        origin: "Organic, Fair Trade",
        in_stock: true,
        tags: &["Sleep", "Relaxation", "Evening", "Organic"],
        guide_benefits: &["relaxation", "sleep"],
    },
    TeaSeed {
        id: 2,
        name: "Morning Clarity Tea",
        description: "Ginkgo, green tea, and mint for mental focus",
        price: "$28.99",
        original_price: "$34.99",
        image: "/premium-green-tea-package-with-mint-leaves.png",
        benefits: &["Enhances focus", "Boosts energy", "Supports memory"],
        rating: 4.9,
        reviews: 203,
        brewing_time: "3-5 min",
        temperature: "80°C",
        ingredients: &["Green Tea", "Ginkgo Biloba", "Peppermint", "Ginseng"],
        origin: "Premium, Single Origin",
        in_stock: true,
        tags: &["Focus", "Energy", "Morning", "Premium"],
        guide_benefits: &["energy", "focus"],
    },
    TeaSeed {
        id: 3,
        name: "Stress Relief Blend",
        description: "Ashwagandha, holy basil, and rose petals for calm",
        price: "$32.99",
        original_price: "$39.99",
        image: "/herbal-tea-package-with-rose-petals-and-herbs.png",
        benefits: &["Reduces stress", "Balances mood", "Promotes calm"],
        rating: 4.7,
        reviews: 89,
        brewing_time: "6-8 min",
        temperature: "90°C",
        ingredients: &["Ashwagandha", "Holy Basil", "Rose Petals", "Chamomile"],
        origin: "Ayurvedic, Traditional",
        in_stock: false,
        tags: &["Stress Relief", "Calm", "Ayurvedic", "Traditional"],
        guide_benefits: &["relaxation", "focus"],
    },
    TeaSeed {
        id: 4,
        name: "Digestive Harmony",
        description: "Ginger, fennel, and peppermint for gut wellness",
        price: "$26.99",
        original_price: "$31.99",
        image: "/digestive-tea-package-with-ginger-and-mint.png",
        benefits: &["Aids digestion", "Soothes stomach", "Reduces bloating"],
        rating: 4.6,
        reviews: 156,
        brewing_time: "4-6 min",
        temperature: "85°C",
        ingredients: &["Ginger", "Fennel", "Peppermint", "Lemon"],
        origin: "Natural, Herbal",
        in_stock: true,
        tags: &["Digestion", "Wellness", "Herbal", "Natural"],
        guide_benefits: &["digestion"],
    },
    TeaSeed {
        id: 5,
        name: "Immune Boost Tea",
        description: "Elderberry, echinacea, and ginger for natural defense",
        price: "$29.99",
        original_price: "$35.99",
        image: "/immune-boost-tea-package-with-elderberry.png",
        benefits: &["Boosts immunity", "Antioxidant rich", "Natural defense"],
        rating: 4.8,
        reviews: 134,
        brewing_time: "5-7 min",
        temperature: "90°C",
        ingredients: &["Elderberry", "Echinacea", "Ginger", "Honey"],
        origin: "Wildcrafted, Organic",
        in_stock: true,
        tags: &["Immunity", "Wellness", "Organic", "Wildcrafted"],
        guide_benefits: &["immunity", "energy"],
    },
    TeaSeed {
        id: 6,
        name: "Deep Sleep Blend",
        description: "Valerian root, passionflower, and chamomile for restful nights",
        price: "$27.99",
        original_price: "$32.99",
        image: "/sleep-tea-package-with-valerian-and-passionflower.png",
        benefits: &["Deep sleep", "Relaxation", "Natural sedative"],
        rating: 4.9,
        reviews: 98,
        brewing_time: "7-10 min",
        temperature: "85°C",
        ingredients: &["Valerian Root", "Passionflower", "Chamomile", "Lavender"],
        origin: "Traditional, Herbal",
        in_stock: true,
        tags: &["Sleep", "Relaxation", "Traditional", "Herbal"],
        guide_benefits: &["sleep", "relaxation"],
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub(super) fn sample_products() -> Vec<Product> {
    TEA_SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price.to_string(),
            original_price: seed.original_price.to_string(),
            image: seed.image.to_string(),
            benefits: owned(seed.benefits),
            rating: seed.rating,
            reviews: seed.reviews,
            brewing_time: seed.brewing_time.to_string(),
            temperature: seed.temperature.to_string(),
            ingredients: owned(seed.ingredients),
            origin: seed.origin.to_string(),
            in_stock: seed.in_stock,
            tags: owned(seed.tags),
            guide_benefits: owned(seed.guide_benefits),
        })
        .collect()
}
