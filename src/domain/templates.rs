//! Built-in note templates.
//!
//! Each template is plain static data: the fields shown on each wizard step,
//! the lines they produce in the note, and the quality checks that gate
//! copying. The formatter in [`super::services`] is generic over this data.

use super::models::{
    CheckRule, Choice, Condition, FieldDef, FieldKind, LineRule, OtherLink, Section, Template,
    TemplateId,
};

pub const TOTAL_STEPS: usize = 5;

const STEP_TITLES: [&str; TOTAL_STEPS] = [
    "DATA Section",
    "DATA Section (continued)",
    "ASSESSMENT Section",
    "PLAN Section",
    "Review & Copy",
];

/// Heading for a 1-indexed wizard step.
pub fn step_title(step: usize) -> &'static str {
    step.checked_sub(1)
        .and_then(|index| STEP_TITLES.get(index))
        .copied()
        .unwrap_or("")
}

pub fn template(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::Transportation => &TRANSPORTATION,
        TemplateId::WellBeing => &WELL_BEING,
        TemplateId::Crisis => &CRISIS,
    }
}

pub fn all_templates() -> [&'static Template; 3] {
    TemplateId::ALL.map(template)
}

const fn text(name: &'static str, prompt: &'static str, step: usize) -> FieldDef {
    FieldDef {
        name,
        prompt,
        step,
        kind: FieldKind::Text,
        required: false,
    }
}

const fn select(
    name: &'static str,
    prompt: &'static str,
    step: usize,
    options: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        name,
        prompt,
        step,
        kind: FieldKind::Select { options, other: None },
        required: false,
    }
}

const fn select_other(
    name: &'static str,
    prompt: &'static str,
    step: usize,
    options: &'static [&'static str],
    sentinel: &'static str,
    other_field: &'static str,
) -> FieldDef {
    FieldDef {
        name,
        prompt,
        step,
        kind: FieldKind::Select {
            options,
            other: Some(OtherLink {
                sentinel,
                field: other_field,
            }),
        },
        required: false,
    }
}

const fn multi(
    name: &'static str,
    prompt: &'static str,
    step: usize,
    choices: &'static [Choice],
    other_field: Option<&'static str>,
) -> FieldDef {
    let other = match other_field {
        Some(field) => Some(OtherLink {
            sentinel: OTHER_CHOICE,
            field,
        }),
        None => None,
    };
    FieldDef {
        name,
        prompt,
        step,
        kind: FieldKind::Multi { choices, other },
        required: false,
    }
}

const fn required(mut field: FieldDef) -> FieldDef {
    field.required = true;
    field
}

const fn choice(id: &'static str, label: &'static str) -> Choice {
    Choice { id, label }
}

const fn line(section: Section, label: &'static str, field: &'static str) -> LineRule {
    LineRule {
        section,
        label,
        field,
        when: None,
    }
}

const fn line_when(
    section: Section,
    label: &'static str,
    field: &'static str,
    when: Condition,
) -> LineRule {
    LineRule {
        section,
        label,
        field,
        when: Some(when),
    }
}

const OTHER_CHOICE: &str = "other";
const NO_SAFETY_CONCERNS: &str = "No concerns identified";

const SAFETY_LEVELS: &[&str] = &[NO_SAFETY_CONCERNS, "Minor concerns", "Significant concerns"];

const FOLLOWUP_TIMEFRAMES: &[&str] = &[
    "None needed",
    "Within 24 hours",
    "Within 48 hours",
    "Within 1 week",
    "Custom",
];

const FOLLOWUP: FieldDef = select_other(
    "followupTimeframe",
    "Follow-up timeframe",
    4,
    FOLLOWUP_TIMEFRAMES,
    "Custom",
    "followupTimeframeCustom",
);

const FOLLOWUP_CUSTOM: FieldDef = text("followupTimeframeCustom", "Custom follow-up timeframe", 4);

const SAFETY_DETAIL_IF_CONCERNED: Condition = Condition::Differs {
    field: "safetyLevel",
    value: NO_SAFETY_CONCERNS,
};

const FOLLOWUP_CHECK: CheckRule = CheckRule::Present {
    description: "Follow-up timeframe specified",
    field: "followupTimeframe",
};

const SAFETY_LEVEL_CHECK: CheckRule = CheckRule::DetailIf {
    description: "Safety concerns documented if identified",
    when: SAFETY_DETAIL_IF_CONCERNED,
    detail: "safetyDetails",
};

// ── Transportation Services ──

const SERVICE_TYPES: &[&str] = &[
    "Transport to shelter",
    "Transport to medical appointment",
    "Transport to social services",
    "Return transport",
    "Other",
];

const TRANSPORT_PRESENTATIONS: &[&str] = &[
    "Calm and cooperative",
    "Anxious but cooperative",
    "Agitated",
    "Withdrawn",
    "Intoxicated/impaired",
    "Other",
];

const ACCESSIBILITY_NEEDS: &[Choice] = &[
    choice("wheelchair", "Wheelchair access"),
    choice("mobilityAid", "Mobility aid (walker/cane)"),
    choice("serviceAnimal", "Service animal"),
    choice("luggage", "Luggage/belongings"),
    choice("childCarSeat", "Child car seat"),
    choice(OTHER_CHOICE, "Other"),
];

const CLIENT_APPEARED: &[&str] = &[
    "Stable and appropriate",
    "In need of additional support",
    "Experiencing distress",
    "Other",
];

const TRANSPORT_NEEDS: &[&str] = &["Routine/scheduled", "Urgent - same day", "Emergency"];

const TRANSPORT_OUTCOMES: &[&str] = &[
    "Client transported successfully",
    "Client declined transport",
    "Client not present at pickup",
    "Transport rescheduled",
    "Other",
];

const TRANSPORT_REFERRALS: &[Choice] = &[
    choice("shelterIntake", "Shelter intake"),
    choice("medicalServices", "Medical services"),
    choice("caseManagement", "Case management"),
    choice("benefitsOffice", "Benefits office"),
    choice(OTHER_CHOICE, "Other"),
];

pub static TRANSPORTATION: Template = Template {
    id: TemplateId::Transportation,
    title: "Transportation Services",
    description: "For transport requests and coordination",
    total_steps: TOTAL_STEPS,
    fields: &[
        required(select_other(
            "serviceType",
            "Service type",
            1,
            SERVICE_TYPES,
            "Other",
            "serviceTypeOther",
        )),
        text("serviceTypeOther", "Other service type", 1),
        required(text("pickupLocation", "Pickup location", 1)),
        required(text("dropoffLocation", "Drop-off location", 1)),
        text("transportTime", "Pickup time", 1),
        text("passengerCount", "Number of passengers", 1),
        required(select_other(
            "clientPresentation",
            "Client presentation",
            2,
            TRANSPORT_PRESENTATIONS,
            "Other",
            "clientPresentationOther",
        )),
        text("clientPresentationOther", "Other presentation", 2),
        multi(
            "accessibilityNeeds",
            "Accessibility needs",
            2,
            ACCESSIBILITY_NEEDS,
            Some("accessibilityNeedsOther"),
        ),
        text("accessibilityNeedsOther", "Other accessibility need", 2),
        text("observations", "Additional observations", 2),
        required(select_other(
            "clientAppeared",
            "Client appeared",
            3,
            CLIENT_APPEARED,
            "Other",
            "clientAppearedOther",
        )),
        text("clientAppearedOther", "Other appearance", 3),
        required(select("transportNeed", "Transport need", 3, TRANSPORT_NEEDS)),
        required(select("safetyLevel", "Safety concerns", 3, SAFETY_LEVELS)),
        text("safetyDetails", "Safety concern details", 3),
        text("assessmentNotes", "Assessment notes", 3),
        select_other(
            "transportOutcome",
            "Transport outcome",
            4,
            TRANSPORT_OUTCOMES,
            "Other",
            "transportOutcomeOther",
        ),
        text("transportOutcomeOther", "Other outcome", 4),
        multi(
            "referrals",
            "Referrals made",
            4,
            TRANSPORT_REFERRALS,
            Some("referralsOther"),
        ),
        text("referralsOther", "Other referral", 4),
        text("planNotes", "Plan notes", 4),
        FOLLOWUP,
        FOLLOWUP_CUSTOM,
    ],
    lines: &[
        line(Section::Data, "Service Type", "serviceType"),
        line(Section::Data, "Pickup Location", "pickupLocation"),
        line(Section::Data, "Drop-off Location", "dropoffLocation"),
        line(Section::Data, "Pickup Time", "transportTime"),
        line(Section::Data, "Passengers", "passengerCount"),
        line(Section::Data, "Client Presentation", "clientPresentation"),
        line(Section::Data, "Accessibility Needs", "accessibilityNeeds"),
        line(Section::Data, "Observations", "observations"),
        line(Section::Assessment, "Client Appeared", "clientAppeared"),
        line(Section::Assessment, "Transport Need", "transportNeed"),
        line(Section::Assessment, "Safety Concerns", "safetyLevel"),
        line_when(
            Section::Assessment,
            "Safety Details",
            "safetyDetails",
            SAFETY_DETAIL_IF_CONCERNED,
        ),
        line(Section::Assessment, "Assessment", "assessmentNotes"),
        line(Section::Plan, "Outcome", "transportOutcome"),
        line(Section::Plan, "Referrals", "referrals"),
        line(Section::Plan, "Plan", "planNotes"),
        line(Section::Plan, "Follow-up", "followupTimeframe"),
    ],
    checks: &[CheckRule::AllRequired, FOLLOWUP_CHECK, SAFETY_LEVEL_CHECK],
};

// ── Senior Well-Being Check ──

const CHECK_TYPES: &[&str] = &[
    "Scheduled wellness visit",
    "Welfare check requested by family",
    "Welfare check requested by agency",
    "Follow-up visit",
    "Other",
];

const CONTACT_METHODS: &[&str] = &[
    "In-person visit",
    "Phone call",
    "Video call",
    "Attempted - no contact",
];

const LIVING_CONDITIONS: &[&str] = &[
    "Clean and safe",
    "Cluttered but safe",
    "Unsafe or unsanitary",
    "Other",
];

const CLIENT_CONDITIONS: &[Choice] = &[
    choice("alertOriented", "Alert and oriented"),
    choice("confused", "Confused or disoriented"),
    choice("mobilityIssues", "Mobility issues"),
    choice("appearsMalnourished", "Appears malnourished"),
    choice("poorHygiene", "Poor hygiene"),
    choice("signsOfInjury", "Signs of injury"),
    choice(OTHER_CHOICE, "Other"),
];

const IMMEDIATE_INTERVENTION: &str = "Immediate intervention needed";

const WELLBEING_LEVELS: &[&str] = &[
    "Doing well",
    "Some concerns",
    "Significant concerns",
    IMMEDIATE_INTERVENTION,
];

const NEEDS_IDENTIFIED: &[Choice] = &[
    choice("food", "food assistance"),
    choice("medical", "medical care"),
    choice("medication", "medication management"),
    choice("housing", "housing assistance"),
    choice("socialContact", "social contact"),
    choice("transportation", "transportation"),
    choice(OTHER_CHOICE, "other"),
];

const ACTIONS_TAKEN: &[Choice] = &[
    choice("providedResources", "Provided resource information"),
    choice("contactedFamily", "Contacted family"),
    choice("referredMedical", "Referred to medical services"),
    choice("referredAps", "Referred to Adult Protective Services"),
    choice("scheduledFollowup", "Scheduled follow-up visit"),
    choice(OTHER_CHOICE, "Other"),
];

pub static WELL_BEING: Template = Template {
    id: TemplateId::WellBeing,
    title: "Senior Well-Being Check",
    description: "For wellness visits and follow-ups",
    total_steps: TOTAL_STEPS,
    fields: &[
        required(select_other(
            "checkType",
            "Type of check",
            1,
            CHECK_TYPES,
            "Other",
            "checkTypeOther",
        )),
        text("checkTypeOther", "Other check type", 1),
        required(text("clientLocation", "Client location", 1)),
        required(select("contactMethod", "Contact method", 1, CONTACT_METHODS)),
        text("requestedBy", "Requested by", 1),
        select_other(
            "livingConditions",
            "Living conditions",
            2,
            LIVING_CONDITIONS,
            "Other",
            "livingConditionsOther",
        ),
        text("livingConditionsOther", "Other living conditions", 2),
        required(multi(
            "clientCondition",
            "Client condition",
            2,
            CLIENT_CONDITIONS,
            Some("clientConditionOther"),
        )),
        text("clientConditionOther", "Other condition", 2),
        text("observations", "Additional observations", 2),
        required(select(
            "overallWellbeing",
            "Overall well-being",
            3,
            WELLBEING_LEVELS,
        )),
        required(select("safetyLevel", "Safety concerns", 3, SAFETY_LEVELS)),
        text("safetyDetails", "Safety concern details", 3),
        multi(
            "needsIdentified",
            "Needs identified",
            3,
            NEEDS_IDENTIFIED,
            Some("needsIdentifiedOther"),
        ),
        text("needsIdentifiedOther", "Other need", 3),
        text("assessmentNotes", "Assessment notes", 3),
        multi(
            "actionsTaken",
            "Actions taken",
            4,
            ACTIONS_TAKEN,
            Some("actionsTakenOther"),
        ),
        text("actionsTakenOther", "Other action", 4),
        text("planNotes", "Plan notes", 4),
        FOLLOWUP,
        FOLLOWUP_CUSTOM,
    ],
    lines: &[
        line(Section::Data, "Check Type", "checkType"),
        line(Section::Data, "Location", "clientLocation"),
        line(Section::Data, "Contact Method", "contactMethod"),
        line(Section::Data, "Requested By", "requestedBy"),
        line(Section::Data, "Living Conditions", "livingConditions"),
        line(Section::Data, "Client Condition", "clientCondition"),
        line(Section::Data, "Observations", "observations"),
        line(Section::Assessment, "Overall Well-Being", "overallWellbeing"),
        line(Section::Assessment, "Safety Concerns", "safetyLevel"),
        line_when(
            Section::Assessment,
            "Safety Details",
            "safetyDetails",
            SAFETY_DETAIL_IF_CONCERNED,
        ),
        line(Section::Assessment, "Needs Identified", "needsIdentified"),
        line(Section::Assessment, "Assessment", "assessmentNotes"),
        line(Section::Plan, "Actions Taken", "actionsTaken"),
        line(Section::Plan, "Plan", "planNotes"),
        line(Section::Plan, "Follow-up", "followupTimeframe"),
    ],
    checks: &[
        CheckRule::AllRequired,
        FOLLOWUP_CHECK,
        SAFETY_LEVEL_CHECK,
        CheckRule::DetailIf {
            description: "Intervention documented if needed",
            when: Condition::Equals {
                field: "overallWellbeing",
                value: IMMEDIATE_INTERVENTION,
            },
            detail: "actionsTaken",
        },
    ],
};

// ── Crisis Response/Shelter Placement ──

const CRISIS_TYPES: &[&str] = &[
    "Housing crisis/homelessness",
    "Domestic violence",
    "Mental health crisis",
    "Substance use crisis",
    "Natural disaster/displacement",
    "Other",
];

const REFERRAL_SOURCES: &[&str] = &[
    "Self",
    "Family member",
    "Law enforcement",
    "Hospital",
    "Community agency",
    "Other",
];

const IMMEDIATE_NEEDS: &[Choice] = &[
    choice("shelter", "Emergency shelter"),
    choice("food", "Food"),
    choice("medical", "Medical attention"),
    choice("clothing", "Clothing"),
    choice("transportation", "Transportation"),
    choice("safetyPlanning", "Safety planning"),
    choice(OTHER_CHOICE, "Other"),
];

const CRISIS_PRESENTATIONS: &[&str] = &[
    "Calm and cooperative",
    "Anxious but cooperative",
    "Distressed/tearful",
    "Agitated",
    "Withdrawn",
    "Other",
];

const SAFETY_CONCERNS: &[Choice] = &[
    choice("noImmediateConcerns", "No immediate safety concerns"),
    choice("suicidalIdeation", "Suicidal ideation"),
    choice("homicidalIdeation", "Homicidal ideation"),
    choice("domesticViolence", "Domestic violence"),
    choice("medicalEmergency", "Medical emergency"),
    choice("substanceUse", "Substance use"),
];

const RISK_LEVELS: &[&str] = &["Low", "Moderate", "High", "Imminent"];

const PLACED_IN_SHELTER: &str = "Placed in shelter";

const PLACEMENT_OUTCOMES: &[&str] = &[
    PLACED_IN_SHELTER,
    "Hotel/motel voucher issued",
    "Referred to DV shelter",
    "Declined placement",
    "No beds available - waitlisted",
    "Other",
];

const CRISIS_REFERRALS: &[Choice] = &[
    choice("crisisLine", "988 crisis line"),
    choice("mentalHealth", "Mental health services"),
    choice("dvAdvocate", "DV advocate"),
    choice("substanceUseTreatment", "Substance use treatment"),
    choice("caseManagement", "Case management"),
    choice(OTHER_CHOICE, "Other"),
];

const SHELTER_PLACEMENT: Condition = Condition::Equals {
    field: "placementOutcome",
    value: PLACED_IN_SHELTER,
};

pub static CRISIS: Template = Template {
    id: TemplateId::Crisis,
    title: "Crisis Response/Shelter Placement",
    description: "For emergency situations",
    total_steps: TOTAL_STEPS,
    fields: &[
        required(select_other(
            "crisisType",
            "Type of crisis",
            1,
            CRISIS_TYPES,
            "Other",
            "crisisTypeOther",
        )),
        text("crisisTypeOther", "Other crisis type", 1),
        required(text("clientLocation", "Current location", 1)),
        select_other(
            "referralSource",
            "Referral source",
            1,
            REFERRAL_SOURCES,
            "Other",
            "referralSourceOther",
        ),
        text("referralSourceOther", "Other referral source", 1),
        text("householdSize", "Household size", 1),
        required(multi(
            "immediateNeeds",
            "Immediate needs",
            2,
            IMMEDIATE_NEEDS,
            Some("immediateNeedsOther"),
        )),
        text("immediateNeedsOther", "Other need", 2),
        required(select_other(
            "clientPresentation",
            "Client presentation",
            2,
            CRISIS_PRESENTATIONS,
            "Other",
            "clientPresentationOther",
        )),
        text("clientPresentationOther", "Other presentation", 2),
        text("observations", "Additional observations", 2),
        multi("safetyConcerns", "Safety concerns", 3, SAFETY_CONCERNS, None),
        text("safetyConcernDetails", "Safety concern details", 3),
        required(select("riskLevel", "Risk level", 3, RISK_LEVELS)),
        text("assessmentNotes", "Assessment notes", 3),
        required(select_other(
            "placementOutcome",
            "Placement outcome",
            4,
            PLACEMENT_OUTCOMES,
            "Other",
            "placementOutcomeOther",
        )),
        text("placementOutcomeOther", "Other outcome", 4),
        text("shelterName", "Shelter name", 4),
        multi(
            "referrals",
            "Referrals made",
            4,
            CRISIS_REFERRALS,
            Some("referralsOther"),
        ),
        text("referralsOther", "Other referral", 4),
        text("planNotes", "Plan notes", 4),
        FOLLOWUP,
        FOLLOWUP_CUSTOM,
    ],
    lines: &[
        line(Section::Data, "Crisis Type", "crisisType"),
        line(Section::Data, "Location", "clientLocation"),
        line(Section::Data, "Referral Source", "referralSource"),
        line(Section::Data, "Household Size", "householdSize"),
        line(Section::Data, "Immediate Needs", "immediateNeeds"),
        line(Section::Data, "Client Presentation", "clientPresentation"),
        line(Section::Data, "Observations", "observations"),
        line(Section::Assessment, "Safety Concerns", "safetyConcerns"),
        line(Section::Assessment, "Safety Details", "safetyConcernDetails"),
        line(Section::Assessment, "Risk Level", "riskLevel"),
        line(Section::Assessment, "Assessment", "assessmentNotes"),
        line(Section::Plan, "Placement", "placementOutcome"),
        line_when(Section::Plan, "Shelter", "shelterName", SHELTER_PLACEMENT),
        line(Section::Plan, "Referrals", "referrals"),
        line(Section::Plan, "Plan", "planNotes"),
        line(Section::Plan, "Follow-up", "followupTimeframe"),
    ],
    checks: &[
        CheckRule::AllRequired,
        FOLLOWUP_CHECK,
        // Only suicidal ideation demands written detail; other flags do not.
        CheckRule::DetailIf {
            description: "Safety concerns addressed if noted",
            when: Condition::Checked {
                field: "safetyConcerns",
                choice: "suicidalIdeation",
            },
            detail: "safetyConcernDetails",
        },
        CheckRule::DetailIf {
            description: "Shelter name recorded for placement",
            when: SHELTER_PLACEMENT,
            detail: "shelterName",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_step_titles() {
        assert_eq!(step_title(1), "DATA Section");
        assert_eq!(step_title(5), "Review & Copy");
        assert_eq!(step_title(0), "");
        assert_eq!(step_title(6), "");
    }

    #[test]
    fn test_lookup_matches_id() {
        for id in TemplateId::ALL {
            assert_eq!(template(id).id, id);
        }
    }

    #[test]
    fn test_field_names_are_unique() {
        for template in all_templates() {
            let mut seen = HashSet::new();
            for field in template.fields {
                assert!(seen.insert(field.name), "{} repeats {}", template.id, field.name);
            }
        }
    }

    #[test]
    fn test_fields_sit_on_input_steps() {
        for template in all_templates() {
            for field in template.fields {
                assert!(
                    (1..template.total_steps).contains(&field.step),
                    "{} places {} on step {}",
                    template.id,
                    field.name,
                    field.step
                );
            }
        }
    }

    #[test]
    fn test_rules_reference_declared_fields() {
        for template in all_templates() {
            for rule in template.lines {
                assert!(template.field(rule.field).is_some(), "{}", rule.field);
            }
            for check in template.checks {
                match check {
                    CheckRule::AllRequired => {}
                    CheckRule::Present { field, .. } => assert!(template.field(field).is_some()),
                    CheckRule::DetailIf { detail, .. } => assert!(template.field(detail).is_some()),
                }
            }
        }
    }

    #[test]
    fn test_other_links_point_at_text_fields() {
        for template in all_templates() {
            for field in template.fields {
                let other = match field.kind {
                    FieldKind::Text => None,
                    FieldKind::Select { options, other } => {
                        if let Some(link) = other {
                            assert!(options.contains(&link.sentinel));
                        }
                        other
                    }
                    FieldKind::Multi { choices, other } => {
                        if let Some(link) = other {
                            assert!(choices.iter().any(|c| c.id == link.sentinel));
                        }
                        other
                    }
                };
                if let Some(link) = other {
                    let companion = template.field(link.field).expect("companion field");
                    assert_eq!(companion.kind, FieldKind::Text);
                }
            }
        }
    }

    #[test]
    fn test_transportation_required_fields() {
        let required: Vec<_> = TRANSPORTATION.required_fields().map(|f| f.name).collect();
        assert_eq!(
            required,
            vec![
                "serviceType",
                "pickupLocation",
                "dropoffLocation",
                "clientPresentation",
                "clientAppeared",
                "transportNeed",
                "safetyLevel",
            ]
        );
    }
}
