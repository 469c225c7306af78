//! End-to-end tests for a whole game driven through the public API.
//!
//! A scripted frontend plays the human side and records every prompt and
//! disclosure so the commit -> contribution -> reveal ordering can be checked.

use fairdice_core::{
    Choice, CommitmentScheme, DiceConfig, DiceGame, FairDiceError, FairnessProtocol, Frontend,
    GameEvent, HmacCommitment, Party, Prompt, RoundKind, SecureRandom,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CLASSIC: [&str; 3] = ["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"];

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Prompt(usize),
    Event(GameEvent),
}

/// Answers every prompt with `answer % options`, recording the exchange
struct Recorder {
    answer: usize,
    steps: Vec<Step>,
}

impl Recorder {
    fn new(answer: usize) -> Self {
        Self {
            answer,
            steps: Vec::new(),
        }
    }

    fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.steps.iter().filter_map(|s| match s {
            Step::Event(e) => Some(e),
            Step::Prompt(_) => None,
        })
    }
}

impl Frontend for Recorder {
    fn choose(&mut self, prompt: &Prompt) -> fairdice_core::Result<Choice> {
        self.steps.push(Step::Prompt(prompt.options.len()));
        Ok(Choice::Pick(self.answer % prompt.options.len()))
    }

    fn show(&mut self, event: &GameEvent) -> fairdice_core::Result<()> {
        self.steps.push(Step::Event(event.clone()));
        Ok(())
    }
}

fn seeded_game(seed: u64) -> DiceGame<StdRng> {
    let dice = DiceConfig::from_args(&CLASSIC)
        .unwrap()
        .into_dice_set()
        .unwrap();
    DiceGame::with_random(dice, SecureRandom::from_rng(StdRng::seed_from_u64(seed)))
}

#[test]
fn test_full_games_are_verifiable() {
    for seed in 0..40 {
        let mut recorder = Recorder::new(seed as usize);
        let report = seeded_game(seed).play(&mut recorder).unwrap();

        assert!(report.verify(), "seed {} produced an unverifiable report", seed);
        assert_ne!(report.human_die, report.house_die);
        assert!(report.human_die.faces().contains(&report.human_roll));
        assert!(report.house_die.faces().contains(&report.house_roll));
    }
}

#[test]
fn test_each_round_commits_before_prompt_and_reveals_after() {
    let mut recorder = Recorder::new(1);
    seeded_game(7).play(&mut recorder).unwrap();

    let committed: Vec<usize> = positions(&recorder.steps, |s| {
        matches!(s, Step::Event(GameEvent::Committed { .. }))
    });
    let revealed: Vec<usize> = positions(&recorder.steps, |s| {
        matches!(s, Step::Event(GameEvent::Revealed(_)))
    });

    assert_eq!(committed.len(), 3);
    assert_eq!(revealed.len(), 3);

    for (commit, reveal) in committed.iter().zip(&revealed) {
        assert!(commit < reveal);
        let prompted = recorder.steps[*commit..*reveal]
            .iter()
            .any(|s| matches!(s, Step::Prompt(_)));
        assert!(prompted, "no contribution between commit and reveal");
    }
}

#[test]
fn test_published_tag_matches_reveal() {
    let mut recorder = Recorder::new(0);
    seeded_game(21).play(&mut recorder).unwrap();

    let tags: Vec<_> = recorder
        .events()
        .filter_map(|e| match e {
            GameEvent::Committed { tag, .. } => Some(*tag),
            _ => None,
        })
        .collect();
    let records: Vec<_> = recorder
        .events()
        .filter_map(|e| match e {
            GameEvent::Revealed(r) => Some(r.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(tags.len(), records.len());
    for (tag, record) in tags.iter().zip(&records) {
        assert_eq!(*tag, record.tag);
        assert!(HmacCommitment::verify(record.secret_number, &record.key, tag));
    }
}

#[test]
fn test_dice_set_shrinks_one_per_assignment() {
    let mut recorder = Recorder::new(2);
    let report = seeded_game(3).play(&mut recorder).unwrap();

    let assignments: Vec<_> = recorder
        .events()
        .filter_map(|e| match e {
            GameEvent::DieAssigned {
                party,
                die,
                remaining,
            } => Some((*party, die.clone(), *remaining)),
            _ => None,
        })
        .collect();

    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].2, 2);
    assert_eq!(assignments[1].2, 1);
    assert_ne!(assignments[0].0, assignments[1].0);

    let first_party = if report.human_first {
        Party::Human
    } else {
        Party::House
    };
    assert_eq!(assignments[0].0, first_party);
}

#[test]
fn test_human_die_offered_from_remainder() {
    for seed in 0..20 {
        let mut recorder = Recorder::new(0);
        let report = seeded_game(seed).play(&mut recorder).unwrap();

        let prompts: Vec<usize> = recorder
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Prompt(n) => Some(*n),
                Step::Event(_) => None,
            })
            .collect();

        // guess, die choice, two roll contributions
        assert_eq!(prompts.len(), 4);
        assert_eq!(prompts[0], 2);
        let expected = if report.human_first { 3 } else { 2 };
        assert_eq!(prompts[1], expected);
        assert_eq!(&prompts[2..], &[6, 6]);
    }
}

#[test]
fn test_two_dice_fail_before_any_round() {
    let err = DiceConfig::from_args(&CLASSIC[..2]).unwrap_err();
    assert!(matches!(err, FairDiceError::Configuration(_)));
}

#[test]
fn test_reveal_on_fresh_round_fails() {
    let mut round = FairnessProtocol::new(RoundKind::HouseRoll, 6).unwrap();
    assert!(matches!(
        round.reveal(),
        Err(FairDiceError::ProtocolState(_))
    ));
}

fn positions<T>(items: &[T], pred: impl Fn(&T) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| pred(item))
        .map(|(i, _)| i)
        .collect()
}
