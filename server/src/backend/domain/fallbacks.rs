//! Canned companion text served when the completion API is unavailable.

use rand::seq::IndexedRandom;
use shared::Mood;

pub const FALLBACK_PROMPTS: &[&str] = &[
    "What is one small thing that brought you comfort today?",
    "Describe a moment this week when you felt most like yourself.",
    "What is weighing on your mind right now, and what would lighten it?",
    "Write about someone who made a difference in your day, however small.",
    "What are three things you are grateful for right now?",
    "If today had a title, what would it be and why?",
    "What would you like to let go of before tomorrow?",
    "Describe a place where you feel calm. What makes it feel that way?",
    "What did you learn about yourself today?",
    "What is one thing you are looking forward to, and why does it matter to you?",
];

pub const FALLBACK_AFFIRMATIONS: &[&str] = &[
    "I am allowed to take things one step at a time.",
    "My feelings are valid, and I give myself room to feel them.",
    "I am growing, even on the days it does not feel like it.",
    "I deserve the same kindness I offer to others.",
    "I can handle today, and I do not have to handle it alone.",
    "Rest is part of my progress, not a pause from it.",
    "I am proud of how far I have come.",
    "I choose to focus on what I can control.",
];

const AWFUL_QUOTES: &[&str] = &[
    "\"This too shall pass.\" - Persian proverb",
    "\"Even the darkest night will end and the sun will rise.\" - Victor Hugo",
    "\"You are braver than you believe, stronger than you seem.\" - A. A. Milne",
];

const BAD_QUOTES: &[&str] = &[
    "\"Fall seven times, stand up eight.\" - Japanese proverb",
    "\"It does not matter how slowly you go as long as you do not stop.\" - Confucius",
    "\"Out of difficulties grow miracles.\" - Jean de La Bruyere",
];

const OKAY_QUOTES: &[&str] = &[
    "\"Nothing is worth more than this day.\" - Johann Wolfgang von Goethe",
    "\"Act as if what you do makes a difference. It does.\" - William James",
    "\"Little by little, one travels far.\" - J. R. R. Tolkien",
];

const GOOD_QUOTES: &[&str] = &[
    "\"Happiness is not something ready made. It comes from your own actions.\" - Dalai Lama",
    "\"Keep your face always toward the sunshine.\" - Walt Whitman",
    "\"The more you praise and celebrate your life, the more there is in life to celebrate.\" - Oprah Winfrey",
];

const GREAT_QUOTES: &[&str] = &[
    "\"Joy is the simplest form of gratitude.\" - Karl Barth",
    "\"Enjoy the little things, for one day you may look back and realize they were the big things.\" - Robert Brault",
    "\"Let us be grateful to the people who make us happy.\" - Marcel Proust",
];

pub fn quotes_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Awful => AWFUL_QUOTES,
        Mood::Bad => BAD_QUOTES,
        Mood::Okay => OKAY_QUOTES,
        Mood::Good => GOOD_QUOTES,
        Mood::Great => GREAT_QUOTES,
    }
}

/// Pick one entry at random; an empty list yields ""
pub fn pick(options: &'static [&'static str]) -> &'static str {
    options.choose(&mut rand::rng()).copied().unwrap_or_default()
}
