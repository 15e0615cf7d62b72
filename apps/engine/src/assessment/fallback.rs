//! Static content bank — the degraded path behind every AI generation call.
//!
//! Hand-authored questions keyed by category, with a default category for
//! unknown keys. Pure lookups: same inputs, same output, no I/O, and never
//! an error — this is what lets the orchestration layer guarantee progress.

use crate::models::question::{CodingQuestion, Difficulty, Question, TestCase};

pub const DEFAULT_CATEGORY: &str = "programming";

struct BankEntry {
    text: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
    topic: &'static str,
}

const PROGRAMMING_BANK: &[BankEntry] = &[
    BankEntry {
        text: "Which data structure gives O(1) average-time lookups by key?",
        options: ["Linked list", "Hash map", "Binary search tree", "Sorted array"],
        correct: 1,
        explanation: "Hash maps index entries by a hash of the key, giving constant average lookup time.",
        topic: "data structures",
    },
    BankEntry {
        text: "What does a stable sorting algorithm guarantee?",
        options: [
            "O(n log n) worst-case time",
            "No extra memory is used",
            "Equal elements keep their relative order",
            "The input is never modified",
        ],
        correct: 2,
        explanation: "Stability means ties preserve their original order; it says nothing about speed or memory.",
        topic: "algorithms",
    },
    BankEntry {
        text: "A function that calls itself must always have:",
        options: ["A global variable", "A base case", "A loop", "More than one argument"],
        correct: 1,
        explanation: "Without a base case the recursion never terminates and the stack overflows.",
        topic: "recursion",
    },
    BankEntry {
        text: "Which statement about version control best describes a merge conflict?",
        options: [
            "Two branches changed the same lines in incompatible ways",
            "A commit failed to compile",
            "The remote repository is unreachable",
            "A branch was deleted before merging",
        ],
        correct: 0,
        explanation: "Conflicts arise when both branches edit the same region and the tool cannot pick a side.",
        topic: "version control",
    },
    BankEntry {
        text: "What is the time complexity of binary search on a sorted array of n elements?",
        options: ["O(n)", "O(n log n)", "O(log n)", "O(1)"],
        correct: 2,
        explanation: "Each probe halves the search interval, so the number of probes is logarithmic in n.",
        topic: "algorithms",
    },
    BankEntry {
        text: "Which of these is a defining property of a pure function?",
        options: [
            "It runs in constant time",
            "It has no observable side effects",
            "It takes exactly one argument",
            "It never returns a collection",
        ],
        correct: 1,
        explanation: "Purity means output depends only on inputs and nothing outside the function changes.",
        topic: "functions",
    },
];

const WEB_BANK: &[BankEntry] = &[
    BankEntry {
        text: "Which HTTP method is idempotent by specification?",
        options: ["POST", "PUT", "PATCH", "CONNECT"],
        correct: 1,
        explanation: "Repeating a PUT with the same body leaves the resource in the same state.",
        topic: "http",
    },
    BankEntry {
        text: "What does a 404 status code mean?",
        options: [
            "The server crashed",
            "The client is not authenticated",
            "The requested resource was not found",
            "The request was rate limited",
        ],
        correct: 2,
        explanation: "404 Not Found: the server has nothing at the requested URI.",
        topic: "http",
    },
    BankEntry {
        text: "Which mechanism lets a browser on site A call an API on site B?",
        options: ["Cookies", "CORS headers", "Local storage", "WebSockets"],
        correct: 1,
        explanation: "Cross-Origin Resource Sharing headers tell the browser which foreign origins may read the response.",
        topic: "browser security",
    },
    BankEntry {
        text: "In a REST API, which URL style best identifies a single user resource?",
        options: ["/getUser?id=7", "/users/7", "/user_action/7/fetch", "/api?entity=user&id=7"],
        correct: 1,
        explanation: "REST models resources as nouns in the path; /users/7 names one user directly.",
        topic: "rest",
    },
    BankEntry {
        text: "What is the primary purpose of HTTPS over HTTP?",
        options: [
            "Faster page loads",
            "Encrypted transport between client and server",
            "Smaller response bodies",
            "Server-side caching",
        ],
        correct: 1,
        explanation: "TLS encrypts and authenticates the channel; speed and size are unrelated.",
        topic: "security",
    },
];

const DATA_SCIENCE_BANK: &[BankEntry] = &[
    BankEntry {
        text: "Which measure of central tendency is most robust to outliers?",
        options: ["Mean", "Median", "Mode", "Range"],
        correct: 1,
        explanation: "The median depends only on rank order, so extreme values barely move it.",
        topic: "statistics",
    },
    BankEntry {
        text: "Overfitting happens when a model:",
        options: [
            "Performs poorly on both training and test data",
            "Memorizes training noise and fails to generalize",
            "Has too few parameters",
            "Is trained on too much data",
        ],
        correct: 1,
        explanation: "An overfit model fits the training set too closely, including its noise, and degrades on unseen data.",
        topic: "machine learning",
    },
    BankEntry {
        text: "What does a train/test split protect against?",
        options: [
            "Slow training",
            "Evaluating a model on data it was fit to",
            "Missing values",
            "Class imbalance",
        ],
        correct: 1,
        explanation: "Held-out data gives an honest estimate of generalization performance.",
        topic: "machine learning",
    },
    BankEntry {
        text: "In SQL, which clause filters rows AFTER aggregation?",
        options: ["WHERE", "GROUP BY", "HAVING", "ORDER BY"],
        correct: 2,
        explanation: "HAVING applies to aggregated groups; WHERE filters rows before grouping.",
        topic: "sql",
    },
    BankEntry {
        text: "A correlation coefficient of -0.9 between two variables means:",
        options: [
            "One causes the other to decrease",
            "They have a strong inverse linear relationship",
            "They are unrelated",
            "The data contains errors",
        ],
        correct: 1,
        explanation: "Correlation measures linear association, not causation; -0.9 is strong and inverse.",
        topic: "statistics",
    },
];

const APTITUDE_BANK: &[BankEntry] = &[
    BankEntry {
        text: "A train covers 120 km in 2 hours. At the same speed, how far does it go in 5 hours?",
        options: ["240 km", "300 km", "360 km", "480 km"],
        correct: 1,
        explanation: "Speed is 60 km/h; 60 × 5 = 300 km.",
        topic: "quantitative",
    },
    BankEntry {
        text: "Find the next number in the sequence: 2, 6, 12, 20, 30, ...",
        options: ["40", "42", "44", "46"],
        correct: 1,
        explanation: "Differences grow by 2 (4, 6, 8, 10, 12); 30 + 12 = 42.",
        topic: "sequences",
    },
    BankEntry {
        text: "If all Bloops are Razzies and all Razzies are Lazzies, then all Bloops are:",
        options: ["Razzies only", "Lazzies", "Neither", "Cannot be determined"],
        correct: 1,
        explanation: "Set inclusion is transitive: Bloops ⊆ Razzies ⊆ Lazzies.",
        topic: "logical reasoning",
    },
    BankEntry {
        text: "A shirt priced at 800 is sold at a 25% discount. What is the sale price?",
        options: ["560", "600", "620", "640"],
        correct: 1,
        explanation: "25% of 800 is 200, so the sale price is 600.",
        topic: "quantitative",
    },
    BankEntry {
        text: "Pointing to a photo, Ravi says: \"She is the daughter of my grandfather's only son.\" Who is she?",
        options: ["His aunt", "His sister", "His niece", "His mother"],
        correct: 1,
        explanation: "The grandfather's only son is Ravi's father, so his daughter is Ravi's sister.",
        topic: "logical reasoning",
    },
];

struct CodingBankEntry {
    title: &'static str,
    description: &'static str,
    function_signature: &'static str,
    test_cases: &'static [(&'static str, &'static str)],
    constraints: &'static [&'static str],
}

const CODING_BANK: &[CodingBankEntry] = &[
    CodingBankEntry {
        title: "Sum of Two Numbers",
        description: "Read two space-separated integers from stdin and print their sum.",
        function_signature: "fn solve(a: i64, b: i64) -> i64",
        test_cases: &[("2 3", "5"), ("-1 1", "0"), ("1000000 2000000", "3000000")],
        constraints: &["-10^9 <= a, b <= 10^9"],
    },
    CodingBankEntry {
        title: "Reverse a String",
        description: "Read one line from stdin and print it reversed.",
        function_signature: "fn solve(s: &str) -> String",
        test_cases: &[("hello", "olleh"), ("a", "a"), ("racecar", "racecar")],
        constraints: &["1 <= len(s) <= 10^5"],
    },
    CodingBankEntry {
        title: "Count Vowels",
        description: "Read one lowercase word from stdin and print how many vowels it contains.",
        function_signature: "fn solve(s: &str) -> usize",
        test_cases: &[("algorithm", "3"), ("rhythm", "0"), ("aeiou", "5")],
        constraints: &["1 <= len(s) <= 10^4", "s contains only a-z"],
    },
];

/// Returns up to `count` questions for `category` at the requested difficulty.
///
/// Unknown categories fall back to the default bank. If the bank holds fewer
/// than `count` entries, everything available is returned — no padding.
pub fn fallback_questions(category: &str, difficulty: Difficulty, count: usize) -> Vec<Question> {
    let key = normalize_category(category);
    let bank = match key.as_str() {
        "programming" => PROGRAMMING_BANK,
        "web-development" => WEB_BANK,
        "data-science" => DATA_SCIENCE_BANK,
        "aptitude" => APTITUDE_BANK,
        _ => PROGRAMMING_BANK,
    };

    bank.iter()
        .take(count)
        .enumerate()
        .map(|(i, entry)| Question {
            id: format!("fallback-{key}-{i}"),
            text: entry.text.to_string(),
            options: entry.options.iter().map(|o| o.to_string()).collect(),
            correct_option_index: entry.correct,
            explanation: entry.explanation.to_string(),
            time_limit_seconds: 60,
            difficulty,
            category: key.clone(),
            topic: entry.topic.to_string(),
            points: 10,
        })
        .collect()
}

/// Static coding exercises used when AI coding-test generation fails.
pub fn fallback_coding_questions(
    topic: &str,
    difficulty: Difficulty,
    count: usize,
) -> Vec<CodingQuestion> {
    CODING_BANK
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, entry)| CodingQuestion {
            id: format!("fallback-coding-{i}"),
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            function_signature: entry.function_signature.to_string(),
            test_cases: entry
                .test_cases
                .iter()
                .map(|(input, expected)| TestCase {
                    input: input.to_string(),
                    expected_output: expected.to_string(),
                })
                .collect(),
            constraints: entry.constraints.iter().map(|c| c.to_string()).collect(),
            difficulty,
            topic: topic.to_string(),
            time_limit_seconds: 900,
        })
        .collect()
}

fn normalize_category(category: &str) -> String {
    let key = category.trim().to_lowercase().replace([' ', '_'], "-");
    match key.as_str() {
        "programming" | "web-development" | "data-science" | "aptitude" => key,
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
