use super::{Alignment, Chapter, Choice, ChoiceOption};

pub static CHAPTERS: [Chapter; 7] = [
    Chapter {
        id: 1,
        title: "The Signal",
        description: "Something shifts. You notice the noise.",
        unlock_level: 1,
        narrative: "For the first time, you see the pattern clearly. Hours dissolving into feeds, tabs, half-finished tasks. Not laziness. Architecture. The systems around you were designed to scatter your attention. You are here because you chose to notice.",
        choice: Some(Choice {
            prompt: "What brought you here?",
            options: [
                ChoiceOption {
                    label: "I need structure",
                    alignment: Alignment::Focused,
                    text: "You recognize that raw effort is not enough. You need a framework. Something to channel the energy that keeps spilling outward.",
                },
                ChoiceOption {
                    label: "I want balance",
                    alignment: Alignment::Balanced,
                    text: "You are not broken. But the equilibrium between effort and rest has eroded. You are here to rebuild it, deliberately.",
                },
                ChoiceOption {
                    label: "I want to push further",
                    alignment: Alignment::Driven,
                    text: "The ceiling is not talent. It is consistency. You already know what you are capable of. Now you need the discipline to prove it daily.",
                },
            ],
        }),
    },
    Chapter {
        id: 2,
        title: "First Light",
        description: "The first real session. Momentum begins.",
        unlock_level: 3,
        narrative: "Your first deep session is not dramatic. No revelation, no breakthrough. Just twenty-five minutes of unbroken attention. And when it ends, something feels different. Not excitement. Clarity. The kind that comes from doing exactly one thing, fully.",
        choice: None,
    },
    Chapter {
        id: 3,
        title: "The Pattern",
        description: "You begin to see your own rhythm.",
        unlock_level: 5,
        narrative: "The data starts to tell a story. Not about productivity metrics. About you. When you are sharpest. When resistance is highest. When autopilot is enough and when you need challenge. This is not optimization. It is self-knowledge.",
        choice: Some(Choice {
            prompt: "What do you do with this knowledge?",
            options: [
                ChoiceOption {
                    label: "Double down on peak hours",
                    alignment: Alignment::Focused,
                    text: "You carve your hardest work into the hours where your mind burns cleanest. Everything else gets moved. Efficiency is a form of respect for your own time.",
                },
                ChoiceOption {
                    label: "Spread the effort evenly",
                    alignment: Alignment::Balanced,
                    text: "Peaks and valleys are natural. You design your schedule to honor both. Sustainable rhythm over unsustainable sprints.",
                },
                ChoiceOption {
                    label: "Push through the valleys",
                    alignment: Alignment::Driven,
                    text: "Comfort is the enemy of growth. You choose to train in the hours that resist you most. If you can focus when it is hard, focusing when it is easy becomes effortless.",
                },
            ],
        }),
    },
    Chapter {
        id: 4,
        title: "Resistance",
        description: "The urge to quit arrives. You expected it.",
        unlock_level: 8,
        narrative: "Day seven. Or twelve. Or three. It does not matter when it hits. What matters is that you expected it. The pull toward the familiar. The voice suggesting that this, too, will fade. It will not fade if you do not let it. Every system has a stress test. This is yours.",
        choice: None,
    },
    Chapter {
        id: 5,
        title: "Compound",
        description: "Small actions, repeated, become undeniable.",
        unlock_level: 12,
        narrative: "You do not feel different. You look at your progress and the graph tells a story your emotions cannot. Seventy hours of focused work. Forty challenges completed. A level of consistency you have not achieved before. This is not motivation. This is evidence.",
        choice: Some(Choice {
            prompt: "What is this becoming?",
            options: [
                ChoiceOption {
                    label: "A discipline practice",
                    alignment: Alignment::Focused,
                    text: "You see it clearly now. Focus is not a skill. It is a practice. Like meditation or training. The work is showing up. The results are side effects.",
                },
                ChoiceOption {
                    label: "A way of living",
                    alignment: Alignment::Balanced,
                    text: "This is not about productivity anymore. It is about how you spend your hours. The boundaries between work and rest are intentional now. That changes everything.",
                },
                ChoiceOption {
                    label: "An edge",
                    alignment: Alignment::Driven,
                    text: "Most people will never do this. Not because they cannot. Because they will not. You are building something that separates you. Not superiority. Distance from mediocrity.",
                },
            ],
        }),
    },
    Chapter {
        id: 6,
        title: "The Quiet",
        description: "Focus becomes your natural state.",
        unlock_level: 18,
        narrative: "You stop announcing your sessions. You stop tracking streaks for the thrill. The work has become quiet. Ordinary. Embedded in who you are. This is the real shift. Not the peak. The plateau that feels like home.",
        choice: None,
    },
    Chapter {
        id: 7,
        title: "Eclipse",
        description: "You have become the system.",
        unlock_level: 25,
        narrative: "There is no final boss. No trophy screen. Only this: the version of you that sat down on day one would not recognize the person reading this now. Not because you changed who you are. Because you stopped letting noise define it. The eclipse is not darkness. It is what happens when you position yourself directly between chaos and purpose. You block out everything that does not matter. And what remains is you.",
        choice: None,
    },
];
