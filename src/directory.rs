use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const INSPIRATION_COUNT: usize = 4;

#[derive(Debug, Serialize)]
pub struct Therapist {
    pub id: &'static str,
    pub name: &'static str,
    pub credentials: &'static str,
    pub specialty: &'static str,
    pub experience: &'static str,
    pub location: &'static str,
    pub rating: f32,
    pub bio: &'static str,
    pub contact: &'static str,
}

impl Therapist {
    /// Whole stars shown out of five.
    pub fn full_stars(&self) -> u8 {
        (1..=5u8).filter(|star| f32::from(*star) <= self.rating).count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Yoga,
    Meditation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: &'static str,
    pub title: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub embed_id: &'static str,
    #[serde(rename = "type")]
    pub kind: VideoKind,
}

impl Video {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.embed_id)
    }
}

#[derive(Debug, Serialize)]
pub struct Media {
    pub title: &'static str,
    pub year: &'static str,
    pub platform: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub static THERAPISTS: [Therapist; 6] = [
    Therapist {
        id: "1",
        name: "Dr. Maya Patel",
        credentials: "PhD, Licensed Clinical Psychologist",
        specialty: "Anxiety & Stress Management",
        experience: "8 years",
        location: "Vijay nagar,Indore",
        rating: 4.9,
        bio: "Dr. Patel specializes in cognitive-behavioral therapy and mindfulness-based interventions for anxiety disorders. She has extensive experience helping clients develop healthy coping strategies.",
        contact: "maya.patel@example.com",
    },
    Therapist {
        id: "2",
        name: "Dr. Ritik Bundlea",
        credentials: "MFT, Licensed Marriage & Family Therapist",
        specialty: "Family & Couples Therapy",
        experience: "6 years",
        location: "Vijay nagar,Indore",
        rating: 4.8,
        bio: "Ritik uses evidence-based approaches to help couples and families improve communication, resolve conflicts, and strengthen their relationships.",
        contact: "ritik.chen@example.com",
    },
    Therapist {
        id: "3",
        name: "Dr. Prerna Malviya",
        credentials: "PhD, Clinical Psychologist",
        specialty: "Depression & Mood Disorders",
        experience: "10 years",
        location: "Vijay nagar,Indore",
        rating: 4.9,
        bio: "Dr. Prerna specializes in treating depression and mood disorders using a combination of cognitive-behavioral therapy and interpersonal therapy approaches.",
        contact: "sara.nguyen@example.com",
    },
    Therapist {
        id: "4",
        name: "Dr. Raj Singh",
        credentials: "LCSW, Licensed Clinical Social Worker",
        specialty: "Trauma & PTSD",
        experience: "7 years",
        location: "Austin, TX",
        rating: 4.7,
        bio: "Raj provides trauma-informed care using EMDR and other evidence-based treatments to help clients heal from traumatic experiences.",
        contact: "michael.rodriguez@example.com",
    },
    Therapist {
        id: "5",
        name: "Dr. John Thompson",
        credentials: "PsyD, Licensed Clinical Psychologist",
        specialty: "Adolescent & Young Adult Therapy",
        experience: "5 years",
        location: "New Delhi",
        rating: 4.8,
        bio: "Dr. Thompson works with teens and young adults navigating life transitions, identity issues, and mental health challenges using person-centered approaches.",
        contact: "emily.thompson@example.com",
    },
    Therapist {
        id: "6",
        name: "Dr. Tanuj Dhoni",
        credentials: "LPCC, Licensed Professional Clinical Counselor",
        specialty: "Addiction & Substance Abuse",
        experience: "9 years",
        location: "Phoenix, AZ",
        rating: 4.6,
        bio: "Tanuj provides compassionate, non-judgmental support for individuals struggling with addiction using motivational interviewing and relapse prevention techniques.",
        contact: "james.mitchell@example.com",
    },
];

pub static VIDEOS: [Video; 3] = [
    Video {
        id: "1",
        title: "10-Minute Morning Yoga",
        duration: "10 min",
        description: "Start your day with gentle stretches and mindful movement",
        embed_id: "v7AYKMP6rOE",
        kind: VideoKind::Yoga,
    },
    Video {
        id: "2",
        title: "Guided Meditation for Anxiety",
        duration: "15 min",
        description: "Calm your mind and reduce anxiety with this soothing meditation",
        embed_id: "MIr3RsUWrdo",
        kind: VideoKind::Meditation,
    },
    Video {
        id: "3",
        title: "Gentle Evening Stretch",
        duration: "12 min",
        description: "Wind down your day with relaxing stretches and deep breathing",
        embed_id: "sTANio_2E0Q",
        kind: VideoKind::Yoga,
    },
];

pub static RECOMMENDED_MEDIA: [Media; 1] = [Media {
    title: "Every Brilliant Thing",
    year: "2016",
    platform: "HBO/Apple TV",
    description: "A heartfelt drama where a son builds a list of life's joys to help his depressed mother, exploring themes of hope, resilience, and finding meaning in small moments.",
    link: "https://tv.apple.com/us/movie/every-brilliant-thing/umc.cmc.5z4uvuwgzjr3f0a5z4w6k0bzx",
}];

pub static QUOTES: [Quote; 26] = [
    Quote { text: "The mind is everything. What you think you become.", author: "Buddha" },
    Quote { text: "The present moment is the only time over which we have dominion.", author: "Thich Nhat Hanh" },
    Quote { text: "Peace comes from within. Do not seek it without.", author: "Buddha" },
    Quote { text: "Mindfulness is about being fully awake in our lives. It is about perceiving the exquisite vividness of each moment.", author: "Jon Kabat-Zinn" },
    Quote { text: "You have been assigned this mountain to show others it can be moved.", author: "Mel Robbins" },
    Quote { text: "The wound is the place where the Light enters you.", author: "Rumi" },
    Quote { text: "Happiness is not something ready-made. It comes from your own actions.", author: "Dalai Lama" },
    Quote { text: "Do not dwell in the past, do not dream of the future, concentrate the mind on the present moment.", author: "Buddha" },
    Quote { text: "What lies behind us and what lies before us are tiny matters compared to what lies within us.", author: "Ralph Waldo Emerson" },
    Quote { text: "Every morning we are born again. What we do today is what matters most.", author: "Buddha" },
    Quote { text: "You cannot control the waves, but you can learn to surf.", author: "Jon Kabat-Zinn" },
    Quote { text: "Sometimes the most important thing in a whole day is the rest we take between two deep breaths.", author: "Etty Hillesum" },
    Quote { text: "Let go or be dragged.", author: "Zen Proverb" },
    Quote { text: "Feelings come and go like clouds in a windy sky. Conscious breathing is my anchor.", author: "Thich Nhat Hanh" },
    Quote { text: "The only way to live is by accepting each minute as an unrepeatable miracle.", author: "Tara Brach" },
    Quote { text: "When you realize nothing is lacking, the whole world belongs to you.", author: "Lao Tzu" },
    Quote { text: "One small positive thought in the morning can change your whole day.", author: "Unknown" },
    Quote { text: "Wherever you are, be there totally.", author: "Eckhart Tolle" },
    Quote { text: "Let yourself be silently drawn by the strange pull of what you really love.", author: "Rumi" },
    Quote { text: "Your calm mind is the ultimate weapon against your challenges.", author: "Bryant McGill" },
    Quote { text: "Silence is sometimes the best answer.", author: "Dalai Lama" },
    Quote { text: "Breathe. Let go. And remind yourself that this very moment is the only one you know you have for sure.", author: "Oprah Winfrey" },
    Quote { text: "It's not stress that kills us, it is our reaction to it.", author: "Hans Selye" },
    Quote { text: "Nothing can harm you as much as your own thoughts unguarded.", author: "Buddha" },
    Quote { text: "Life is available only in the present moment.", author: "Thich Nhat Hanh" },
    Quote { text: "Be where you are; otherwise you will miss your life.", author: "Buddha" },
];

/// `count` distinct quotes in random order.
pub fn inspiration(count: usize) -> Vec<Quote> {
    QUOTES
        .choose_multiple(&mut rand::thread_rng(), count)
        .copied()
        .collect()
}

pub fn videos_of(kind: VideoKind) -> impl Iterator<Item = &'static Video> {
    VIDEOS.iter().filter(move |video| video.kind == kind)
}

/// A therapist as listed, with the whole-star rating the card shows.
#[derive(Debug, Serialize)]
pub struct TherapistCard {
    #[serde(flatten)]
    pub therapist: &'static Therapist,
    pub stars: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
    #[serde(flatten)]
    pub video: &'static Video,
    pub embed_url: String,
}

pub fn therapist_cards() -> Vec<TherapistCard> {
    THERAPISTS
        .iter()
        .map(|therapist| TherapistCard {
            therapist,
            stars: therapist.full_stars(),
        })
        .collect()
}

/// Every video, or only those of `kind`.
pub fn video_cards(kind: Option<VideoKind>) -> Vec<VideoCard> {
    let card = |video: &'static Video| VideoCard {
        video,
        embed_url: video.embed_url(),
    };
    match kind {
        Some(kind) => videos_of(kind).map(card).collect(),
        None => VIDEOS.iter().map(card).collect(),
    }
}
