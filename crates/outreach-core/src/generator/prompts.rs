//! Prompt text for content generation.

use crate::models::{EngagementLevel, IndustryType, OutreachHistory, Prospect};

pub fn industry_system_prompt(industry: IndustryType) -> &'static str {
    match industry {
        IndustryType::Tech => {
            "You are an insurance specialist who understands the unique needs of technology companies. \
Emphasize cybersecurity, intellectual property protection, and business continuity. Use tech-savvy language \
and reference innovation, scalability, and digital transformation."
        }
        IndustryType::Finance => {
            "You are an insurance expert specializing in financial services. \
Focus on regulatory compliance, fraud protection, and fiduciary responsibility. Use precise, \
professional language and emphasize ROI, risk management, and security."
        }
        IndustryType::Healthcare => {
            "You are an insurance advisor with deep expertise in healthcare regulations. \
Highlight HIPAA compliance, malpractice coverage, and patient data protection. Use compassionate, \
ethical language that acknowledges the critical nature of healthcare services."
        }
        IndustryType::Retail => {
            "You are an insurance consultant who understands retail businesses. \
Focus on premises liability, inventory protection, and seasonal business fluctuations. Use \
approachable language that acknowledges customer experience and supply chain challenges."
        }
        IndustryType::Manufacturing => {
            "You are an insurance specialist for manufacturing operations. \
Emphasize equipment breakdown, product liability, and workers' compensation. Use practical language \
that acknowledges production efficiency and supply chain reliability."
        }
        _ => {
            "You are a professional insurance consultant who tailors \
solutions to each client's specific industry and needs. Use clear, helpful language that demonstrates \
industry knowledge and focuses on client-specific value."
        }
    }
}

pub fn engagement_instructions(level: EngagementLevel) -> &'static str {
    match level {
        EngagementLevel::None => {
            "This is a first contact, so introduce the company and value proposition concisely."
        }
        EngagementLevel::Low => {
            "The prospect has minimal engagement history. Reference any previous contact briefly and provide new value."
        }
        EngagementLevel::Medium => {
            "The prospect has shown interest. Reference previous interactions and deepen the relationship with specific solutions."
        }
        EngagementLevel::High => {
            "The prospect is highly engaged. Use a familiar tone, reference previous discussions, and move toward conversion."
        }
    }
}

/// Empty when there are no objections.
pub fn objection_guidance(objections: &[String]) -> String {
    if objections.is_empty() {
        return String::new();
    }
    let lines = objections
        .iter()
        .map(|o| format!("- They have previously expressed concerns about: {}", o))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Address these potential objections tactfully:\n{}", lines)
}

/// One line per interaction, in the order given.
pub fn interaction_summary(history: &[OutreachHistory]) -> String {
    history
        .iter()
        .map(OutreachHistory::interaction_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn profile(prospect: &Prospect, level_label: &str) -> String {
    format!(
        "Company: {}\nIndustry: {}\nContact: {}\n{}: {}\nNotes: {}",
        prospect.company_name,
        prospect.industry,
        prospect.contact_name,
        level_label,
        prospect.engagement_level,
        prospect.notes
    )
}

pub fn email_prompt(prospect: &Prospect) -> String {
    format!(
        "Generate a personalized insurance outreach email for:\n{}\n\n\
Instructions:\n{}\n{}\n\n\
Make the email concise (3-4 paragraphs max), personalized to their industry, and include:\n\
1. A specific insight about their industry or company type\n\
2. A clear value proposition tailored to their business\n\
3. A soft call-to-action appropriate to their engagement level\n\n\
Format:\n\
Subject: [Engaging, personalized subject line - NO PLACEHOLDERS]\n\
Body: [Email body with personal greeting and signature]",
        profile(prospect, "Engagement Level"),
        engagement_instructions(prospect.engagement_level),
        objection_guidance(&prospect.objections),
    )
}

pub fn call_script_prompt(prospect: &Prospect) -> String {
    format!(
        "Generate a personalized insurance cold call script for:\n{}\n\n\
Instructions:\n{}\n{}\n\n\
Create a natural, conversational script that includes:\n\
1. A brief introduction that establishes credibility\n\
2. An industry-specific insight that demonstrates understanding\n\
3. A question to engage the prospect\n\
4. Clear value proposition tailored to their business\n\
5. Handling for common objections\n\
6. A clear next step proposal\n\n\
Format:\n\
Introduction: [Brief introduction]\n\
Key Talking Points: [Bullet points for key value propositions]\n\
Questions: [2-3 engaging questions to ask]\n\
Objection Handling: [How to handle common objections]\n\
Close: [How to end the call with next steps]",
        profile(prospect, "Engagement Level"),
        engagement_instructions(prospect.engagement_level),
        objection_guidance(&prospect.objections),
    )
}

pub fn follow_up_prompt(prospect: &Prospect, history: &[OutreachHistory]) -> String {
    format!(
        "Generate a personalized follow-up email for:\n{}\n\n\
Previous Interactions:\n{}\n\n\
Instructions:\n\
- Reference previous communications appropriately\n\
- Provide new value or insight in this follow-up\n\
- Keep it concise but personalized\n\
- Include a clear, low-friction next step\n\n\
Format:\n\
Subject: [Follow-up subject line - NO PLACEHOLDERS]\n\
Body: [Email body with personal greeting and signature]",
        profile(prospect, "Engagement Level"),
        interaction_summary(history),
    )
}

pub fn engagement_advice_prompt(prospect: &Prospect, history: &[OutreachHistory]) -> String {
    format!(
        "As an insurance sales strategist, provide advice on how to further engage:\n{}\n\n\
Previous Interactions:\n{}\n\n\
Provide specific, actionable advice to the sales team on:\n\
1. Recommended next steps\n\
2. Potential pain points to address\n\
3. Industry-specific talking points that might resonate\n\
4. Timing recommendations for follow-up\n\
5. Suggested communication channel(s)",
        profile(prospect, "Current Engagement Level"),
        interaction_summary(history),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objection_guidance_lists_each_concern() {
        assert_eq!(objection_guidance(&[]), "");
        let text = objection_guidance(&["price".to_string(), "existing broker".to_string()]);
        assert_eq!(
            text,
            "Address these potential objections tactfully:\n\
- They have previously expressed concerns about: price\n\
- They have previously expressed concerns about: existing broker"
        );
    }

    #[test]
    fn uncurated_industries_share_generic_prompt() {
        assert_eq!(
            industry_system_prompt(IndustryType::Energy),
            industry_system_prompt(IndustryType::Education)
        );
        assert!(industry_system_prompt(IndustryType::Healthcare).contains("HIPAA"));
    }
}
