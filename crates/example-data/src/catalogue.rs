//! The curated catalogue contents.

use crate::{SeedArticle, SeedCatalogue, SeedDoctor, SeedTip};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Build the demo catalogue: five doctors across common specializations,
/// four editorial articles, and four daily tips.
#[must_use]
pub fn catalogue() -> SeedCatalogue {
    SeedCatalogue {
        doctors: doctors(),
        articles: articles(),
        tips: tips(),
    }
}

fn doctors() -> Vec<SeedDoctor> {
    vec![
        SeedDoctor {
            email: "dr.smith@healthcare.com".to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. Sarah Smith".to_owned(),
            phone: "+1 (555) 123-4567".to_owned(),
            gender: "Female".to_owned(),
            age: 42,
            specialization: "Cardiologist".to_owned(),
            experience: 15,
            consultation_fee: 100,
            expertise: tags(&["Heart Disease", "Hypertension", "Cardiac Surgery", "ECG"]),
            about: "Board-certified cardiologist with 15 years of experience in treating \
                    heart conditions and preventive care."
                .to_owned(),
        },
        SeedDoctor {
            email: "dr.johnson@healthcare.com".to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. Michael Johnson".to_owned(),
            phone: "+1 (555) 234-5678".to_owned(),
            gender: "Male".to_owned(),
            age: 38,
            specialization: "Pediatrician".to_owned(),
            experience: 10,
            consultation_fee: 80,
            expertise: tags(&[
                "Child Health",
                "Vaccinations",
                "Growth Development",
                "Pediatric Care",
            ]),
            about: "Dedicated pediatrician specializing in child healthcare and development."
                .to_owned(),
        },
        SeedDoctor {
            email: "dr.garcia@healthcare.com".to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. Maria Garcia".to_owned(),
            phone: "+1 (555) 345-6789".to_owned(),
            gender: "Female".to_owned(),
            age: 40,
            specialization: "Dermatologist".to_owned(),
            experience: 12,
            consultation_fee: 90,
            expertise: tags(&[
                "Skin Conditions",
                "Acne Treatment",
                "Cosmetic Dermatology",
                "Skin Cancer",
            ]),
            about: "Expert dermatologist with focus on medical and cosmetic skin treatments."
                .to_owned(),
        },
        SeedDoctor {
            email: "dr.lee@healthcare.com".to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. James Lee".to_owned(),
            phone: "+1 (555) 456-7890".to_owned(),
            gender: "Male".to_owned(),
            age: 35,
            specialization: "General Physician".to_owned(),
            experience: 8,
            consultation_fee: 60,
            expertise: tags(&[
                "Primary Care",
                "Preventive Medicine",
                "Chronic Disease",
                "Health Checkups",
            ]),
            about: "General practitioner providing comprehensive primary healthcare services."
                .to_owned(),
        },
        SeedDoctor {
            email: "dr.patel@healthcare.com".to_owned(),
            password: "doctor123".to_owned(),
            name: "Dr. Priya Patel".to_owned(),
            phone: "+1 (555) 567-8901".to_owned(),
            gender: "Female".to_owned(),
            age: 41,
            specialization: "Psychiatrist".to_owned(),
            experience: 14,
            consultation_fee: 120,
            expertise: tags(&["Mental Health", "Anxiety", "Depression", "Therapy", "Counseling"]),
            about: "Experienced psychiatrist specializing in mental health and wellness."
                .to_owned(),
        },
    ]
}

fn articles() -> Vec<SeedArticle> {
    vec![
        SeedArticle {
            id: "article_1".to_owned(),
            title: "Understanding Heart Disease: Symptoms and Prevention".to_owned(),
            category: "illness".to_owned(),
            image: "https://images.unsplash.com/photo-1535914254981-b5012eebbd15".to_owned(),
            excerpt: "Heart disease remains one of the leading causes of death worldwide."
                .to_owned(),
            content: "Heart disease remains one of the leading causes of death worldwide. \
                      Understanding the symptoms and taking preventive measures can \
                      significantly reduce your risk."
                .to_owned(),
            read_time: "5 min read".to_owned(),
            published_at: "2025-10-28".to_owned(),
        },
        SeedArticle {
            id: "article_2".to_owned(),
            title: "The Healing Power of Turmeric".to_owned(),
            category: "herbal".to_owned(),
            image: "https://images.unsplash.com/photo-1545840716-c82e9eec6930".to_owned(),
            excerpt: "Turmeric has been used in traditional medicine for thousands of years."
                .to_owned(),
            content: "Turmeric has been used in traditional medicine for thousands of years. \
                      Its active compound, curcumin, offers powerful anti-inflammatory \
                      properties."
                .to_owned(),
            read_time: "4 min read".to_owned(),
            published_at: "2025-10-27".to_owned(),
        },
        SeedArticle {
            id: "article_3".to_owned(),
            title: "Managing Diabetes Through Diet".to_owned(),
            category: "illness".to_owned(),
            image: "https://images.unsplash.com/photo-1535914254981-b5012eebbd15".to_owned(),
            excerpt: "Living with diabetes requires careful attention to diet.".to_owned(),
            content: "Living with diabetes requires careful attention to diet. This \
                      comprehensive guide will help you understand which foods to embrace \
                      and which to avoid."
                .to_owned(),
            read_time: "6 min read".to_owned(),
            published_at: "2025-10-26".to_owned(),
        },
        SeedArticle {
            id: "article_4".to_owned(),
            title: "Ginger: A Natural Remedy for Nausea".to_owned(),
            category: "herbal".to_owned(),
            image: "https://images.unsplash.com/photo-1545840716-c82e9eec6930".to_owned(),
            excerpt: "Ginger is a powerful natural remedy used for centuries.".to_owned(),
            content: "Ginger is a powerful natural remedy that has been used for centuries \
                      to treat nausea and digestive problems."
                .to_owned(),
            read_time: "3 min read".to_owned(),
            published_at: "2025-10-25".to_owned(),
        },
    ]
}

fn tips() -> Vec<SeedTip> {
    vec![
        SeedTip {
            id: "tip_1".to_owned(),
            title: "Stay Hydrated".to_owned(),
            description: "Drink at least 8 glasses of water daily to maintain optimal \
                          health and energy levels."
                .to_owned(),
            icon: "droplets".to_owned(),
            category: "Wellness".to_owned(),
        },
        SeedTip {
            id: "tip_2".to_owned(),
            title: "Get Enough Sleep".to_owned(),
            description: "Aim for 7-9 hours of quality sleep each night to support your \
                          immune system and mental health."
                .to_owned(),
            icon: "moon".to_owned(),
            category: "Sleep".to_owned(),
        },
        SeedTip {
            id: "tip_3".to_owned(),
            title: "Exercise Regularly".to_owned(),
            description: "Engage in at least 30 minutes of moderate exercise 5 days a week \
                          for cardiovascular health."
                .to_owned(),
            icon: "activity".to_owned(),
            category: "Fitness".to_owned(),
        },
        SeedTip {
            id: "tip_4".to_owned(),
            title: "Eat Colorful Vegetables".to_owned(),
            description: "Include a variety of colorful vegetables in your diet to get a \
                          wide range of nutrients."
                .to_owned(),
            icon: "apple".to_owned(),
            category: "Nutrition".to_owned(),
        },
    ]
}
