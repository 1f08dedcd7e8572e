//! Curated per-industry facts used when semantic lookup is unavailable.

const TECH: [&str; 4] = [
    "Tech companies face unique cybersecurity risks related to data breaches.",
    "Intellectual property insurance protects tech innovations and software.",
    "Business interruption coverage is critical for SaaS and cloud services.",
    "Tech startups often need specialized E&O insurance for their digital products.",
];

const FINANCE: [&str; 4] = [
    "Financial institutions require comprehensive fraud protection and cyber liability.",
    "Professional liability coverage protects against claims of financial mismanagement.",
    "D&O insurance is essential for finance executives facing regulatory scrutiny.",
    "Finance companies need comprehensive coverage for digital assets and transactions.",
];

const HEALTHCARE: [&str; 4] = [
    "Healthcare organizations need HIPAA-compliant cyber liability coverage.",
    "Medical malpractice insurance protects healthcare providers against claims.",
    "Healthcare facilities require specialized property insurance for medical equipment.",
    "Telemedicine providers need tailored E&O coverage for digital health services.",
];

const RETAIL: [&str; 4] = [
    "Retailers need comprehensive general liability for customer injuries on premises.",
    "Product liability insurance protects retailers from claims related to sold goods.",
    "Business interruption insurance is vital for protecting against supply chain disruptions.",
    "Retail businesses need specialized coverage for inventory and seasonal fluctuations.",
];

const MANUFACTURING: [&str; 4] = [
    "Manufacturing businesses need equipment breakdown and business interruption coverage.",
    "Product liability insurance is essential for manufacturers to protect against defect claims.",
    "Workers' compensation is critical due to higher injury rates in manufacturing.",
    "Environmental liability coverage protects against pollution risks in manufacturing.",
];

/// Industries with a curated list, in seeding order.
pub const CURATED_INDUSTRIES: [&str; 5] = ["tech", "finance", "healthcare", "retail", "manufacturing"];

/// Facts for an industry; anything without a curated list gets the tech facts.
pub fn facts_for(industry: &str) -> &'static [&'static str] {
    match industry {
        "finance" => &FINANCE,
        "healthcare" => &HEALTHCARE,
        "retail" => &RETAIL,
        "manufacturing" => &MANUFACTURING,
        _ => &TECH,
    }
}

/// Facts rendered as `- {fact}` lines.
pub fn static_knowledge(industry: &str) -> String {
    facts_for(industry)
        .iter()
        .map(|fact| format!("- {}", fact))
        .collect::<Vec<_>>()
        .join("\n")
}
