//! Static page copy for the storefront sections.

use serde::Serialize;

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeroSlide {
    pub product_id: ProductId,
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub benefits: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
    pub theme: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JourneyStep {
    pub step: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BenefitCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MindfulMoment {
    pub title: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
}

pub const HERO_SLIDES: &[HeroSlide] = &[
    HeroSlide {
        product_id: ProductId(1),
        name: "Tranquil Evening Blend",
        description: "A soothing chamomile and lavender blend perfect for unwinding after a long day",
        image: "/elegant-tea-package-with-chamomile-flowers.png",
        benefits: &["Promotes relaxation", "Improves sleep quality", "Reduces stress"],
    },
    HeroSlide {
        product_id: ProductId(2),
        name: "Morning Clarity Tea",
        description: "Energizing green tea with ginseng and mint to start your day mindfully",
        image: "/premium-green-tea-package-with-mint-leaves.png",
        benefits: &["Boosts energy", "Enhances focus", "Rich in antioxidants"],
    },
    HeroSlide {
        product_id: ProductId(4),
        name: "Digestive Harmony",
        description: "Gentle herbal blend with ginger and fennel to support digestive wellness",
        image: "/herbal-tea-package-with-ginger-and-fennel.png",
        benefits: &["Aids digestion", "Soothes stomach", "Natural ingredients"],
    },
];

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "In the silence between sips, we find our truest selves.",
        author: "Ancient Tea Wisdom",
        theme: "mindfulness",
    },
    Quote {
        text: "Every cup of tea represents an imaginary voyage.",
        author: "Catherine Douzel",
        theme: "journey",
    },
    Quote {
        text: "Tea is the elixir of life, bringing peace to the restless soul.",
        author: "Zen Botanica",
        theme: "peace",
    },
    Quote { text: "Where there is tea, there is hope.", author: "Arthur Wing Pinero", theme: "hope" },
    Quote {
        text: "Tea is a cup of life, steeped in moments of tranquility.",
        author: "Zen Philosophy",
        theme: "tranquility",
    },
    Quote {
        text: "In every leaf lies the wisdom of the earth.",
        author: "Botanical Wisdom",
        theme: "nature",
    },
];

pub const JOURNEY_STEPS: &[JourneyStep] = &[
    JourneyStep {
        step: "01",
        title: "Discover Your Needs",
        description: "Begin by understanding your unique wellness goals and how different botanicals can support your journey to better health.",
        action: "Take Our Quiz",
    },
    JourneyStep {
        step: "02",
        title: "Explore Our Collection",
        description: "Browse our carefully curated selection of premium teas and herbs, each chosen for their therapeutic properties and exceptional quality.",
        action: "View Products",
    },
    JourneyStep {
        step: "03",
        title: "Create Your Ritual",
        description: "Develop a personalized tea practice that fits seamlessly into your daily routine, bringing moments of peace and mindfulness.",
        action: "Learn Techniques",
    },
    JourneyStep {
        step: "04",
        title: "Experience Transformation",
        description: "Feel the gentle, cumulative benefits as natural botanicals support your body's innate wisdom and healing capacity.",
        action: "Join Community",
    },
];

pub const BENEFIT_CARDS: &[BenefitCard] = &[
    BenefitCard {
        icon: "🧘",
        title: "Stress Relief",
        description: "Natural adaptogens help your body manage stress and promote inner calm",
    },
    BenefitCard {
        icon: "💤",
        title: "Better Sleep",
        description: "Gentle herbs like chamomile and lavender support restful, rejuvenating sleep",
    },
    BenefitCard {
        icon: "🌿",
        title: "Digestive Health",
        description: "Soothing botanicals aid digestion and promote gut wellness naturally",
    },
    BenefitCard {
        icon: "✨",
        title: "Mental Clarity",
        description: "Cognitive-supporting herbs enhance focus and mental sharpness",
    },
    BenefitCard {
        icon: "💚",
        title: "Immune Support",
        description: "Antioxidant-rich teas strengthen your body's natural defenses",
    },
    BenefitCard {
        icon: "🌸",
        title: "Emotional Balance",
        description: "Mood-supporting botanicals help maintain emotional equilibrium",
    },
];

pub const MINDFUL_MOMENTS: &[MindfulMoment] = &[
    MindfulMoment {
        title: "Morning Ritual",
        description: "Begin each day with intention. Let the warmth of your tea cup ground you in the present moment.",
        tip: "Take three deep breaths before your first sip",
    },
    MindfulMoment {
        title: "Afternoon Pause",
        description: "When the day feels overwhelming, create a sacred pause and reconnect with your inner calm.",
        tip: "Close your eyes and focus on the tea's aroma",
    },
    MindfulMoment {
        title: "Evening Reflection",
        description: "As twilight approaches, use your tea time for gentle reflection and prepare your mind for rest.",
        tip: "Journal three things you're grateful for",
    },
    MindfulMoment {
        title: "Weekend Ceremony",
        description: "Transform your weekend tea into a mindful ceremony and make space for deeper connection.",
        tip: "Prepare your tea with full attention and presence",
    },
];
