use storage::models::Category;

use crate::error::{ImporterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub state: &'static str,
}

pub const CITIES: [City; 10] = [
    City { name: "Mumbai", state: "Maharashtra" },
    City { name: "Bangalore", state: "Karnataka" },
    City { name: "Delhi", state: "Delhi" },
    City { name: "Hyderabad", state: "Telangana" },
    City { name: "Pune", state: "Maharashtra" },
    City { name: "Chennai", state: "Tamil Nadu" },
    City { name: "Kolkata", state: "West Bengal" },
    City { name: "Gurgaon", state: "Haryana" },
    City { name: "Ahmedabad", state: "Gujarat" },
    City { name: "Noida", state: "Uttar Pradesh" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub title: &'static str,
    pub organizer: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub base_prize: i64,
}

/// Immutable set of templates and cities the synthesizer draws from.
#[derive(Debug, Clone)]
pub struct Catalogue {
    templates: Vec<Template>,
    cities: Vec<City>,
}

impl Catalogue {
    pub fn new(templates: Vec<Template>, cities: Vec<City>) -> Result<Self> {
        if templates.is_empty() {
            return Err(ImporterError::ValidationError(
                "Catalogue needs at least one template".to_string(),
            ));
        }
        if cities.is_empty() {
            return Err(ImporterError::ValidationError(
                "Catalogue needs at least one city".to_string(),
            ));
        }
        Ok(Self { templates, cities })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Fifteen current-trend templates across ten Indian cities.
    pub fn standard() -> Self {
        Self {
            templates: standard_templates(),
            cities: CITIES.to_vec(),
        }
    }
}

fn standard_templates() -> Vec<Template> {
    vec![
        Template {
            title: "AI Innovation Challenge 2025",
            organizer: "Microsoft India",
            category: Category::AiMl,
            description: "Build innovative AI solutions to solve real-world problems using cutting-edge machine learning techniques. Participants will work with Azure AI services and create applications that can make a positive impact on society.",
            base_prize: 500_000,
        },
        Template {
            title: "Smart City Hackathon",
            organizer: "Government of India",
            category: Category::Iot,
            description: "Design and develop smart city solutions using IoT, sensors, and data analytics. Create applications that can improve urban living through technology innovation.",
            base_prize: 300_000,
        },
        Template {
            title: "FinTech Revolution 2025",
            organizer: "Razorpay",
            category: Category::Blockchain,
            description: "Revolutionize financial services with blockchain technology and digital payments. Build secure, scalable fintech solutions that can transform the banking industry.",
            base_prize: 750_000,
        },
        Template {
            title: "EduTech Innovation Challenge",
            organizer: "Byju's",
            category: Category::WebDevelopment,
            description: "Create innovative educational technology solutions that enhance learning experiences. Develop platforms, tools, and applications that make education more accessible and engaging.",
            base_prize: 400_000,
        },
        Template {
            title: "HealthTech Hackathon 2025",
            organizer: "Apollo Hospitals",
            category: Category::AiMl,
            description: "Develop AI-powered healthcare solutions to improve patient care and medical diagnosis. Build applications that can assist doctors and enhance healthcare delivery.",
            base_prize: 600_000,
        },
        Template {
            title: "Sustainable Tech Challenge",
            organizer: "Tata Consultancy Services",
            category: Category::DataScience,
            description: "Create technology solutions for environmental sustainability and climate change. Use data science and analytics to build applications that promote green technology.",
            base_prize: 800_000,
        },
        Template {
            title: "Gaming Innovation Contest",
            organizer: "Unity Technologies",
            category: Category::GameDevelopment,
            description: "Design and develop innovative mobile games using Unity engine. Create engaging gaming experiences that showcase creativity and technical excellence.",
            base_prize: 350_000,
        },
        Template {
            title: "Cybersecurity Challenge 2025",
            organizer: "Wipro",
            category: Category::Cybersecurity,
            description: "Build cybersecurity solutions to protect against modern threats. Develop tools and applications that enhance digital security for businesses and individuals.",
            base_prize: 450_000,
        },
        Template {
            title: "E-commerce Innovation Hub",
            organizer: "Flipkart",
            category: Category::WebDevelopment,
            description: "Innovate the future of e-commerce with cutting-edge web and mobile solutions. Create platforms that enhance shopping experiences and business operations.",
            base_prize: 700_000,
        },
        Template {
            title: "AgriTech Hackathon",
            organizer: "Indian Space Research Organisation",
            category: Category::Iot,
            description: "Develop technology solutions for modern agriculture using satellite data and IoT sensors. Build applications that help farmers increase productivity and sustainability.",
            base_prize: 500_000,
        },
        Template {
            title: "Social Impact Tech Challenge",
            organizer: "Google India",
            category: Category::MobileDevelopment,
            description: "Create mobile applications that address social issues and create positive community impact. Build solutions that empower communities and solve societal challenges.",
            base_prize: 1_000_000,
        },
        Template {
            title: "Transportation Innovation Lab",
            organizer: "Uber India",
            category: Category::AiMl,
            description: "Innovate the future of transportation with AI and machine learning. Develop intelligent systems for autonomous vehicles, route optimization, and smart mobility.",
            base_prize: 600_000,
        },
        Template {
            title: "Design Thinking Workshop",
            organizer: "Adobe India",
            category: Category::Design,
            description: "Showcase your design skills by creating innovative user experiences and interfaces. Use Adobe Creative Suite to design compelling digital products.",
            base_prize: 250_000,
        },
        Template {
            title: "Cloud Computing Challenge",
            organizer: "Amazon Web Services",
            category: Category::WebDevelopment,
            description: "Build scalable cloud-native applications using AWS services. Demonstrate expertise in cloud architecture, serverless computing, and microservices.",
            base_prize: 550_000,
        },
        Template {
            title: "Quantum Computing Hackathon",
            organizer: "IBM India",
            category: Category::AiMl,
            description: "Explore the possibilities of quantum computing and develop applications using quantum algorithms. Work with IBM Quantum services to create innovative solutions.",
            base_prize: 900_000,
        },
    ]
}
