//! Short-form clip hooks.
//!
//! Five factories each derive one [`ClipIdea`] from the same input. Every idea
//! is decorated with the doc tie-back and hero-step sentences, then the list
//! is deduplicated by case-insensitive title and cut to [`MAX_CLIPS`].

use std::collections::HashSet;

use tracing::{debug, instrument};

use speedrun_shared::{ClipIdea, ClipOutline, ClipOutlineInput};

use crate::text::ellipsize;

/// Most clip ideas returned per request.
pub const MAX_CLIPS: usize = 5;

/// Doc summaries quoted in a description are cut to this many characters.
const SUMMARY_EXCERPT_LEN: usize = 140;

/// Keywords that mark a plan step as the hero step.
const HERO_KEYWORDS: [&str; 3] = ["highlight", "hero", "stretch goal"];

type ClipFactory = fn(&ClipOutlineInput) -> ClipIdea;

/// Factories in output order.
const CLIP_FACTORIES: [ClipFactory; 5] = [
    hero_moment,
    versus_pain,
    speedrun_recap,
    friction_to_flow,
    pro_tip,
];

/// The first step mentioning a hero keyword, else the last step.
pub fn hero_step(plan_steps: Option<&[String]>) -> Option<&str> {
    let steps = plan_steps.filter(|steps| !steps.is_empty())?;
    steps
        .iter()
        .find(|step| {
            let normalized = step.to_lowercase();
            HERO_KEYWORDS.iter().any(|keyword| normalized.contains(keyword))
        })
        .or_else(|| steps.last())
        .map(String::as_str)
}

/// Outline clip ideas for `input`.
#[instrument(skip_all, fields(product = %input.product_name))]
pub fn clip_outline(input: &ClipOutlineInput) -> ClipOutline {
    let clips = dedupe_by_title(
        CLIP_FACTORIES
            .iter()
            .map(|factory| decorate(factory(input), input)),
    );

    debug!(count = clips.len(), "clip ideas outlined");
    ClipOutline { clips }
}

/// Keep the first idea per case-insensitive title, up to [`MAX_CLIPS`].
fn dedupe_by_title(ideas: impl IntoIterator<Item = ClipIdea>) -> Vec<ClipIdea> {
    let mut seen = HashSet::new();
    ideas
        .into_iter()
        .filter(|clip| seen.insert(clip.title.to_lowercase()))
        .take(MAX_CLIPS)
        .collect()
}

fn decorate(clip: ClipIdea, input: &ClipOutlineInput) -> ClipIdea {
    let mut extra: Vec<String> = Vec::new();

    if let Some(summary) = &input.doc_summary {
        extra.push(format!(
            "Tie back to the doc insight: {}",
            ellipsize(summary, SUMMARY_EXCERPT_LEN)
        ));
    }
    if let Some(hero) = hero_step(input.plan_steps.as_deref()) {
        extra.push(format!("Use the \"{hero}\" beat as the visual hook."));
    }

    if extra.is_empty() {
        return clip;
    }

    ClipIdea {
        description: format!("{} {}", clip.description, extra.join(" "))
            .trim()
            .to_string(),
        ..clip
    }
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

fn hero_moment(input: &ClipOutlineInput) -> ClipIdea {
    let ClipOutlineInput {
        product_name,
        main_win,
        ..
    } = input;
    let hook = match hero_step(input.plan_steps.as_deref()) {
        Some(hero) => format!("Relive \"{hero}\" in under 90 seconds."),
        None => format!("Relive the moment {product_name} unlocked {main_win}."),
    };
    ClipIdea {
        title: format!("{product_name} Hero Moment"),
        hook,
        description: format!(
            "Recreate the aha moment so viewers see the {main_win} payoff live."
        ),
    }
}

fn versus_pain(input: &ClipOutlineInput) -> ClipIdea {
    let ClipOutlineInput {
        product_name,
        main_win,
        main_pain,
        ..
    } = input;
    ClipIdea {
        title: format!("{product_name} vs. {main_pain}"),
        hook: format!("Still fighting {main_pain}? Watch {product_name} erase it in one take."),
        description: format!(
            "Contrast the legacy pain with the {main_win} moment inside the session."
        ),
    }
}

fn speedrun_recap(input: &ClipOutlineInput) -> ClipIdea {
    let ClipOutlineInput {
        product_name,
        main_win,
        ..
    } = input;
    let opener = input.plan_steps.as_ref().and_then(|steps| steps.first());
    let hook = match opener {
        Some(opener) => format!("Step 1: {opener}. Step 2: ship {main_win}."),
        None => format!("We built {main_win} with {product_name} in minutes."),
    };
    ClipIdea {
        title: format!("{product_name} Speedrun"),
        hook,
        description: "Fast-forward through the setup, highlight the aha moment, and show the final output.".into(),
    }
}

fn friction_to_flow(input: &ClipOutlineInput) -> ClipIdea {
    let ClipOutlineInput {
        product_name,
        main_pain,
        ..
    } = input;
    ClipIdea {
        title: format!("From friction to flow with {product_name}"),
        hook: format!("The fastest way we found to skip {main_pain}?"),
        description: "Narrate how the tool reframes the workflow and the exact commands/settings used.".into(),
    }
}

fn pro_tip(input: &ClipOutlineInput) -> ClipIdea {
    let ClipOutlineInput {
        product_name,
        main_win,
        ..
    } = input;
    ClipIdea {
        title: format!("{product_name} Pro Tip"),
        hook: format!("Use this one {product_name} trick to unlock {main_win}."),
        description: "Zoom in on the most cinematic moment\u{2014}UI state, logs, or dashboard\u{2014}and tease the recipe.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ClipOutlineInput {
        ClipOutlineInput {
            product_name: "Vercel Visual Editing".into(),
            main_win: "Launched multiplayer visual editing in under 30 minutes.".into(),
            main_pain: "Manual content approvals dragging through endless screenshots.".into(),
            ..Default::default()
        }
    }

    fn steps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_input_yields_five_undecorated_clips() {
        let outline = clip_outline(&input());
        assert_eq!(outline.clips.len(), MAX_CLIPS);
        assert_eq!(outline.clips[0].title, "Vercel Visual Editing Hero Moment");
        assert_eq!(
            outline.clips[0].hook,
            "Relive the moment Vercel Visual Editing unlocked Launched multiplayer visual editing in under 30 minutes.."
        );
        assert_eq!(
            outline.clips[3].description,
            "Narrate how the tool reframes the workflow and the exact commands/settings used."
        );
        assert_eq!(outline.clips[2].hook, "We built Launched multiplayer visual editing in under 30 minutes. with Vercel Visual Editing in minutes.");
    }

    #[test]
    fn hero_hook_without_plan_quotes_main_win_verbatim() {
        let clip_input = ClipOutlineInput {
            product_name: "Acme".into(),
            main_win: "shipped auth".into(),
            main_pain: "pain".into(),
            ..Default::default()
        };
        let outline = clip_outline(&clip_input);
        assert_eq!(outline.clips[0].hook, "Relive the moment Acme unlocked shipped auth.");
    }

    #[test]
    fn hero_step_prefers_keywords() {
        let plan = steps(&["Scan docs", "Highlight the editor", "Ship a Stretch Goal"]);
        assert_eq!(hero_step(Some(plan.as_slice())), Some("Highlight the editor"));
    }

    #[test]
    fn hero_step_falls_back_to_last() {
        let plan = steps(&["Scan docs", "Bootstrap app", "Deploy preview"]);
        assert_eq!(hero_step(Some(plan.as_slice())), Some("Deploy preview"));
        assert_eq!(hero_step(Some(&[] as &[String])), None);
        assert_eq!(hero_step(None), None);
    }

    #[test]
    fn plan_steps_drive_hooks_and_decoration() {
        let mut clip_input = input();
        clip_input.plan_steps = Some(steps(&["Scan docs", "Demonstrate one hero workflow", "Polish"]));
        clip_input.doc_summary = Some("Docs say ship fast.".into());

        let outline = clip_outline(&clip_input);
        let hero = &outline.clips[0];
        assert_eq!(hero.hook, "Relive \"Demonstrate one hero workflow\" in under 90 seconds.");
        assert_eq!(
            hero.description,
            "Recreate the aha moment so viewers see the Launched multiplayer visual editing in under 30 minutes. payoff live. \
             Tie back to the doc insight: Docs say ship fast. \
             Use the \"Demonstrate one hero workflow\" beat as the visual hook."
        );
        assert_eq!(outline.clips[2].hook, format!("Step 1: Scan docs. Step 2: ship {}.", clip_input.main_win));
        for clip in &outline.clips {
            assert!(clip.description.ends_with("as the visual hook."));
        }
    }

    #[test]
    fn titles_are_unique_case_insensitively() {
        let clip_input = ClipOutlineInput {
            product_name: "acme".into(),
            main_win: "win".into(),
            main_pain: "PAIN".into(),
            ..Default::default()
        };
        let titles: Vec<String> = clip_outline(&clip_input)
            .clips
            .into_iter()
            .map(|c| c.title.to_lowercase())
            .collect();
        let unique: HashSet<&String> = titles.iter().collect();
        assert_eq!(unique.len(), titles.len());
    }

    fn idea(title: &str, hook: &str) -> ClipIdea {
        ClipIdea {
            title: title.into(),
            hook: hook.into(),
            description: String::new(),
        }
    }

    #[test]
    fn duplicate_titles_keep_first_occurrence() {
        let kept = dedupe_by_title(vec![
            idea("Acme Pro Tip", "first"),
            idea("ACME PRO TIP", "second"),
            idea("Acme Speedrun", "third"),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].hook, "first");
        assert_eq!(kept[1].hook, "third");
    }

    #[test]
    fn dedupe_caps_at_five() {
        let ideas = (0..8).map(|i| idea(&format!("Clip {i}"), "hook"));
        let kept = dedupe_by_title(ideas);
        assert_eq!(kept.len(), MAX_CLIPS);
        assert_eq!(kept[4].title, "Clip 4");
    }

    #[test]
    fn long_doc_summary_is_ellipsized() {
        let mut clip_input = input();
        clip_input.doc_summary = Some("y".repeat(300));
        let outline = clip_outline(&clip_input);
        let expected_tail = format!("Tie back to the doc insight: {}...", "y".repeat(137));
        assert!(outline.clips[1].description.ends_with(&expected_tail));
    }
}
