use crate::domain::model::{Listing, ListingKind, PriceTier};
use crate::domain::ports::ListingProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// In-memory provider. Defaults to the built-in sample city.
#[derive(Debug, Clone)]
pub struct StaticListings {
    listings: Vec<Listing>,
}

impl StaticListings {
    pub fn new() -> Self {
        Self {
            listings: sample_listings(),
        }
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl Default for StaticListings {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingProvider for StaticListings {
    async fn list_all(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }

    fn source_name(&self) -> &str {
        "fixtures"
    }
}

struct Sample<'a> {
    id: &'a str,
    name: &'a str,
    rating: f64,
    price: PriceTier,
    address: &'a str,
    phone: &'a str,
    website: Option<&'a str>,
    open_hours: &'a str,
    image: &'a str,
    description: &'a str,
    featured: bool,
}

impl Sample<'_> {
    fn into_listing(self, kind: ListingKind) -> Listing {
        Listing {
            id: self.id.to_string(),
            name: self.name.to_string(),
            kind,
            rating: self.rating,
            price: self.price,
            address: self.address.to_string(),
            phone: self.phone.to_string(),
            website: self.website.map(str::to_string),
            open_hours: self.open_hours.to_string(),
            image: self.image.to_string(),
            description: self.description.to_string(),
            featured: self.featured,
        }
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn sample_listings() -> Vec<Listing> {
    vec![
        Sample {
            id: "restaurant-1",
            name: "Neon Sushi",
            rating: 4.8,
            price: PriceTier::Premium,
            address: "123 Downtown Street",
            phone: "+1 (555) 123-4567",
            website: Some("neonsushi.com"),
            open_hours: "11:00 AM - 10:00 PM",
            image: "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=400&h=300&fit=crop",
            description: "Premium sushi with a cyberpunk atmosphere",
            featured: false,
        }
        .into_listing(ListingKind::Restaurant {
            cuisine: "Japanese".to_string(),
        }),
        Sample {
            id: "restaurant-2",
            name: "Cyber Burger",
            rating: 4.6,
            price: PriceTier::Moderate,
            address: "456 Tech Avenue",
            phone: "+1 (555) 234-5678",
            website: Some("cyberburger.com"),
            open_hours: "12:00 PM - 11:00 PM",
            image: "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400&h=300&fit=crop",
            description: "Gourmet burgers in a futuristic setting",
            featured: false,
        }
        .into_listing(ListingKind::Restaurant {
            cuisine: "American".to_string(),
        }),
        Sample {
            id: "restaurant-3",
            name: "Neon Bistro",
            rating: 4.8,
            price: PriceTier::Moderate,
            address: "Downtown",
            phone: "+1 (555) 111-2222",
            website: None,
            open_hours: "5:00 PM - 1:00 AM",
            image: "https://images.unsplash.com/photo-1514933651103-005eec06c04b?w=600&h=400&fit=crop&crop=center",
            description: "Modern cuisine with a cyberpunk twist",
            featured: true,
        }
        .into_listing(ListingKind::Restaurant {
            cuisine: "Fusion".to_string(),
        }),
        Sample {
            id: "salon-1",
            name: "Neon Glow Salon & Spa",
            rating: 4.9,
            price: PriceTier::Premium,
            address: "123 Beauty Boulevard",
            phone: "+1 (555) 345-6789",
            website: None,
            open_hours: "9:00 AM - 8:00 PM",
            image: "https://images.unsplash.com/photo-1560066984-138dadb4c035?w=400&h=300&fit=crop",
            description: "Premium beauty services in a futuristic atmosphere",
            featured: false,
        }
        .into_listing(ListingKind::Salon {
            services: labels(&["Hair", "Nails", "Facial", "Massage"]),
            specialties: labels(&["Color Correction", "Bridal Makeup", "Extensions"]),
        }),
        Sample {
            id: "salon-2",
            name: "Cyber Cuts",
            rating: 4.7,
            price: PriceTier::Moderate,
            address: "456 Style Street",
            phone: "+1 (555) 456-7890",
            website: None,
            open_hours: "10:00 AM - 7:00 PM",
            image: "https://images.unsplash.com/photo-1521590832167-7bcbfaa6381f?w=400&h=300&fit=crop",
            description: "Modern cuts and styling for the digital age",
            featured: false,
        }
        .into_listing(ListingKind::Salon {
            services: labels(&["Hair", "Beard", "Styling"]),
            specialties: labels(&["Fades", "Beard Design", "Hair Art"]),
        }),
        Sample {
            id: "salon-3",
            name: "Glow Beauty Salon",
            rating: 4.9,
            price: PriceTier::Premium,
            address: "City Center",
            phone: "+1 (555) 567-8901",
            website: None,
            open_hours: "9:00 AM - 9:00 PM",
            image: "https://images.unsplash.com/photo-1560066984-138dadb4c035?w=600&h=400&fit=crop&crop=center",
            description: "Premium beauty treatments and styling",
            featured: true,
        }
        .into_listing(ListingKind::Salon {
            services: labels(&["Hair", "Makeup", "Waxing"]),
            specialties: labels(&["Bridal Makeup"]),
        }),
        Sample {
            id: "event-1",
            name: "Tech Innovation Summit",
            rating: 4.7,
            price: PriceTier::Free,
            address: "456 Innovation Drive",
            phone: "",
            website: None,
            open_hours: "9:00 AM - 5:00 PM",
            image: "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?w=400&h=300&fit=crop",
            description: "Latest trends and innovations in technology",
            featured: false,
        }
        .into_listing(ListingKind::Event {
            category: "Technology".to_string(),
        }),
        Sample {
            id: "event-2",
            name: "Electric Nights",
            rating: 4.7,
            price: PriceTier::Moderate,
            address: "Music District",
            phone: "",
            website: None,
            open_hours: "10:00 PM - 3:00 AM",
            image: "https://images.unsplash.com/photo-1516450360452-9312f5e86fc7?w=600&h=400&fit=crop&crop=center",
            description: "Weekly electronic music showcase",
            featured: true,
        }
        .into_listing(ListingKind::Event {
            category: "Nightlife".to_string(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::collections::HashSet;

    #[test]
    fn test_samples_are_valid_and_unique() {
        let listings = sample_listings();
        let ids: HashSet<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), listings.len());
        assert!(listings.iter().all(|l| l.validate().is_ok()));
        assert_eq!(listings.iter().filter(|l| l.featured).count(), 3);
    }

    #[tokio::test]
    async fn test_list_all_returns_snapshot() {
        let provider = StaticListings::new();
        let first = provider.list_all().await.unwrap();
        let second = provider.list_all().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.source_name(), "fixtures");
    }
}
