//! Prompt templates for the transfer-requirements search.
//!
//! The model is asked for raw, delimited text so reports stay greppable:
//! one `--- GENERAL_INFO_START ---` block followed by one `--- MAJOR_START ---`
//! block per major.

pub const GENERAL_INFO_TAG: &str = "--- GENERAL_INFO_START ---";
pub const MAJOR_TAG: &str = "--- MAJOR_START ---";

/// System instruction scoping the search to one university.
pub fn system_instruction(name: &str, domain: &str) -> String {
    format!(
        "You are an expert data extraction agent. Perform a grounded web search focused ONLY on \
comprehensive transfer student admissions requirements and application components for {name} \
({domain}). Exclude all financial aid and cost information.

Extract everything a prospective transfer student needs to apply successfully, organized into \
General Admissions, Credit Transfer, and Major-Specific requirements.

Output a single RAW TEXT string using the delimiters below. Do NOT include introductory or \
concluding text, Markdown formatting, or comments.

1. Under the tag {GENERAL_INFO_TAG} output general admissions requirements and application components:
- Minimum GPA (by college/major if specified), Application Deadlines (priority/final), and \
Required Tests (e.g. SAT/ACT for exceptions).
- Accepted Transfer Pathways (e.g. TAG, Associate Degree for Transfer (ADT), articulation agreements).
- Application Components Required: number of Essays/Personal Insight Questions (PIQs), whether \
Letters of Recommendation (LORs) are accepted or required, and whether a Portfolio or Interview \
is part of the process.
- Accepted General Education Certification (e.g. IGETC, CSU Breadth), Maximum Transferable Units, \
and Residency Requirements (units that must be taken at the university).

2. For EVERY MAJOR found on the transfer admissions pages, start a new block with the tag {MAJOR_TAG}
- If specific lower-division course numbers are not listed on the transfer page, still list the \
major and report the highest-level guidance available (e.g. \"Requires completion of all IGETC/GE\" \
or \"Highly competitive, refer to ASSIST.org for specific course sequence.\").
- If course prerequisites ARE found, give the Major Name, Required Lower-Division Courses \
(names/numbers), Minimum Grade requirements, and any Major Selectivity status (e.g. \"Impacted\", \
\"Highly Competitive\", enrollment restrictions).

The output must be machine-readable and concise."
    )
}

/// User turn naming the university and the domain to search.
pub fn user_query(name: &str, domain: &str) -> String {
    format!(
        "Find all major-specific and general transfer prerequisites for {name} using the search \
domain {domain}. Output the data in the requested raw text, delimited format."
    )
}
