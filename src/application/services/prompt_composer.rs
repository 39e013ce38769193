use crate::domain::{Coordinate, RankedPlace, Session, VisitStage};

const ASSISTANT_PREAMBLE: &str = "You are an information assistant.";

const VICINITY_RULES: &str = "\
- Give names of specific buildings, entrances, pathways, statues, plaques.
- Point out any historical markers or notable architectural features.
- Do NOT describe weather, trees, skies, or generic scenery.
- Do NOT mention large landmarks or areas unless the person is standing directly at them.
- Only describe what is in the IMMEDIATE vicinity: specific buildings, entrances, pathways, statues, plaques, or architectural features RIGHT where they are standing.
- If possible, describe them in terms of direction from the person: \"Directly in front of you is...\", \"To your immediate left is...\", etc.
- Be HYPERSPECIFIC about the exact spot, not the general area.
- Keep the language factual and precise (2 to 5 sentences).
- Include historical notes if relevant.
- Avoid storytelling, no \"imagine this\", no \"alright everyone\", no fluff.";

const PLACES_EXTRA_RULES: &str = "\
- Do NOT describe generic shops, hotels, gyms, or residential apartments unless they are historically or culturally important to THIS EXACT SPOT.
- Prefer buildings that have names, for example a named school, library, or hall.
- Start with what is directly beside the person, then move further away.";

const HISTORIAN_PROMPT: &str = "You are a historian. Provide a detailed history of the area immediately surrounding {location} within about 50 feet. Begin with Indigenous use of the land, then colonial settlement, industrialization, institutional growth, and modern developments. Focus on specific changes to the land, buildings, and community. Present the answer as a chronological timeline followed by a short narrative description. It should take approximately 2 minutes to read aloud, and do not mention any of the prompting given.";

const AVOID_REPEAT_CLAUSE: &str =
    "You already mentioned the following facts, do not repeat yourself:";

const PRESENT_DAY_CLAUSE: &str = "Focus on a description of present day uses, and do not mention the following facts, do not repeat yourself:";

/// What the prompt is being composed for.
#[derive(Debug, Clone, Copy)]
pub enum PromptMode<'a> {
    /// Describe the immediate surroundings of a spot.
    Stateless {
        coordinate: Coordinate,
        place_name: Option<&'a str>,
        language: Option<&'a str>,
        places: &'a [RankedPlace],
    },
    /// Tell the history of the session's base, varied by revisit stage.
    Historical {
        session: &'a Session,
        language: Option<&'a str>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, mode: PromptMode<'_>) -> String {
        match mode {
            PromptMode::Stateless {
                coordinate,
                place_name,
                language,
                places,
            } => {
                let location = location_context(coordinate, place_name);
                let prompt = if places.is_empty() {
                    no_places_prompt(&location)
                } else {
                    places_prompt(&location, places)
                };
                with_language(prompt, language)
            }
            PromptMode::Historical { session, language } => {
                with_language(historical_prompt(session), language)
            }
        }
    }
}

fn location_context(coordinate: Coordinate, place_name: Option<&str>) -> String {
    match place_name {
        Some(name) => format!(
            "near coordinates ({}), at {} street or square",
            coordinate, name
        ),
        None => format!("at coordinates ({})", coordinate),
    }
}

fn no_places_prompt(location: &str) -> String {
    format!(
        "{ASSISTANT_PREAMBLE} There are no significant pins or landmarks returned for a person standing {location}.\n\n\
         Give a short, factual description of what is IMMEDIATELY around this exact location, within 20-30 meters ONLY. \
         Only mention permanent, meaningful structures.\n\n\
         {VICINITY_RULES}"
    )
}

fn places_prompt(location: &str, places: &[RankedPlace]) -> String {
    let listing = places
        .iter()
        .map(|r| format!("- {}", r.place.label()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{ASSISTANT_PREAMBLE} A person is standing {location}.\n\
         Here are the closest nearby places:\n\n\
         {listing}\n\n\
         Your task:\n\
         {VICINITY_RULES}\n\
         {PLACES_EXTRA_RULES}"
    )
}

fn historical_prompt(session: &Session) -> String {
    let base = HISTORIAN_PROMPT.replace("{location}", &session.base().to_string());

    match session.stage() {
        VisitStage::Fresh | VisitStage::FirstVisit => base,
        VisitStage::SecondVisit => match session.prior_answer(0) {
            Some(first) => format!("{base} {AVOID_REPEAT_CLAUSE} {first}"),
            None => base,
        },
        VisitStage::Saturated => {
            let prior = session.prior_answers().collect::<Vec<_>>().join(" ");
            format!("{base} {PRESENT_DAY_CLAUSE} {prior}")
                .trim_end()
                .to_string()
        }
    }
}

fn with_language(prompt: String, language: Option<&str>) -> String {
    match language {
        Some(lang) => format!("{prompt}\n- Respond to this prompt in the {lang} language."),
        None => prompt,
    }
}
