use catcher_gym::{
    Action, Catcher, CatcherConfig, EnvError, Environment, Observation, OutputType, Phase, Position,
};

fn five_grid() -> Catcher {
    Catcher::new(CatcherConfig::new(5, OutputType::Position).with_seed(0)).unwrap()
}

// Fruit and basket both in column 2: four stays end in a catch.
#[test]
fn staying_under_the_fruit_catches_it() {
    let mut env = five_grid();
    env.set_position(Position::new(0, 2, 2)).unwrap();

    let mut rewards = Vec::new();
    let mut rows = Vec::new();
    for _ in 0..4 {
        let step = env.update(Action::Stay).unwrap();
        rows.push(step.observation.as_position().unwrap()[0]);
        rewards.push(step.reward);
    }

    assert_eq!(rows, vec![1, 2, 3, 4]);
    assert_eq!(rewards, vec![0.0, 0.0, 0.0, 1.0]);
    assert!(env.is_over().unwrap());
    assert_eq!(env.phase(), Phase::Terminal);
    assert_eq!(env.state().unwrap(), [Position::new(4, 2, 2)]);
}

#[test]
fn adjacent_basket_still_catches() {
    let mut env = five_grid();
    env.set_position(Position::new(0, 0, 3)).unwrap();
    let actions = [Action::Left, Action::Left, Action::Stay, Action::Stay];
    let last = actions
        .iter()
        .map(|&a| env.update(a).unwrap())
        .last()
        .unwrap();
    assert_eq!(last.observation, Observation::Position([4, 0, 1]));
    assert_eq!(last.reward, 1.0);
}

#[test]
fn running_away_misses() {
    let mut env = five_grid();
    env.set_position(Position::new(0, 0, 1)).unwrap();
    let mut last = None;
    while !env.is_over().unwrap() {
        last = Some(env.update(Action::Right).unwrap());
    }
    let last = last.unwrap();
    assert!(last.is_over);
    assert_eq!(last.reward, -1.0);
    assert_eq!(env.position().basket_col, 4);
}

#[test]
fn reset_leaves_terminal_phase() {
    let mut env = five_grid();
    env.set_position(Position::new(3, 1, 1)).unwrap();
    env.update(Action::Stay).unwrap();
    assert!(matches!(env.update(Action::Stay), Err(EnvError::NotReady(_))));

    env.reset().unwrap();
    assert_eq!(env.phase(), Phase::Falling);
    assert_eq!(env.position().fruit_row, 0);
    assert!(!env.is_over().unwrap());
}

#[test]
fn same_seed_same_trajectory() {
    let run = || {
        let mut env = Catcher::new(CatcherConfig::new(8, OutputType::Position).with_seed(77)).unwrap();
        let mut trace = Vec::new();
        for episode in 0..5 {
            env.reset().unwrap();
            while !env.is_over().unwrap() {
                let action = Action::ALL[episode % 3];
                trace.push(env.update(action).unwrap());
            }
        }
        trace
    };
    assert_eq!(run(), run());
}

#[test]
fn unknown_output_type_kwarg_fails_fast() {
    let mut kwargs = catcher_gym::KwArgs::new();
    kwargs.insert("output_type".into(), "rgb".into());
    kwargs.insert("output_shape".into(), "3".into());
    let err = catcher_gym::make("Catcher-v0", &kwargs).err().unwrap();
    assert!(matches!(err, EnvError::InvalidConfiguration(_)));
}
