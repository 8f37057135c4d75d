//! Integration tests for the learner/worker round protocol.

use burn::backend::ndarray::NdArray;
use burn::backend::Autodiff;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::softmax;

use super::config::AgentConfig;
use super::error::AgentError;
use super::learner::CentralLearner;
use super::model::{PolicyModel, TrainablePolicy, TrainableValue, ValueModel};
use super::worker::RolloutWorker;
use crate::algorithms::variant::ModelVariant;
use crate::core::param_slot::ParamSlot;
use crate::core::trajectory::Trajectory;

type B = Autodiff<NdArray<f32>>;
type InnerB = NdArray<f32>;

/// Single-layer softmax policy for testing.
#[derive(Module, Debug)]
struct TestPolicy<B: burn::tensor::backend::Backend> {
    linear: Linear<B>,
    #[module(skip)]
    state_dim: usize,
    #[module(skip)]
    n_actions: usize,
}

impl<B: burn::tensor::backend::Backend> TestPolicy<B> {
    fn new(state_dim: usize, n_actions: usize, device: &B::Device) -> Self {
        Self {
            linear: LinearConfig::new(state_dim, n_actions).init(device),
            state_dim,
            n_actions,
        }
    }
}

impl<B: burn::tensor::backend::Backend> PolicyModel<B> for TestPolicy<B> {
    fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.linear.forward(states), 1)
    }

    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }
}

impl TrainablePolicy<B> for TestPolicy<B> {}

/// Single-layer value estimator for testing.
#[derive(Module, Debug)]
struct TestValue<B: burn::tensor::backend::Backend> {
    linear: Linear<B>,
    #[module(skip)]
    state_dim: usize,
}

impl<B: burn::tensor::backend::Backend> TestValue<B> {
    fn new(state_dim: usize, device: &B::Device) -> Self {
        Self {
            linear: LinearConfig::new(state_dim, 1).init(device),
            state_dim,
        }
    }
}

impl<B: burn::tensor::backend::Backend> ValueModel<B> for TestValue<B> {
    fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(states)
    }

    fn state_dim(&self) -> usize {
        self.state_dim
    }
}

impl TrainableValue<B> for TestValue<B> {}

fn learner(variant: ModelVariant) -> CentralLearner<B, TestPolicy<B>, TestValue<B>> {
    let device = Default::default();
    let config = AgentConfig::new(4, 3).with_variant(variant);
    let policy = TestPolicy::new(4, 3, &device);
    let critic = variant.uses_critic().then(|| TestValue::new(4, &device));
    CentralLearner::new(config, policy, critic, device).unwrap()
}

fn worker(seed: u64) -> RolloutWorker<InnerB, TestPolicy<InnerB>> {
    let device = Default::default();
    let config = AgentConfig::new(4, 3);
    let policy = TestPolicy::new(4, 3, &device);
    RolloutWorker::new(config, policy, seed, device).unwrap()
}

fn five_step_trajectory(actions: Vec<u32>) -> Trajectory {
    let states: Vec<Vec<f32>> = (0..5)
        .map(|i| vec![i as f32 * 0.1, 0.5, -0.25, 1.0])
        .collect();
    Trajectory::from_steps(4, &states, actions, vec![1.0, 0.0, 0.0, 0.0, 1.0], true).unwrap()
}

#[test]
fn test_end_to_end_round() {
    let mut central = learner(ModelVariant::Original);
    let mut worker = worker(9);

    // Broadcast canonical parameters to the worker.
    let slot = ParamSlot::new();
    slot.publish(central.policy_params());
    let (snapshot, version) = slot.fetch().unwrap();
    assert_eq!(version, 1);
    worker.hard_update(&snapshot).unwrap();

    // Worker rollout: five actions from a fixed seed.
    let mut actions = Vec::new();
    for step in 0..5 {
        let state = vec![step as f32 * 0.1, 0.5, -0.25, 1.0];
        let (action, probs) = worker.select_action(&state).unwrap();
        assert!(action < 3);
        assert_eq!(probs.len(), 3);
        let total: f32 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-4, "probabilities sum to {}", total);
        actions.push(action);
    }

    // Central gradient computation and update.
    let trajectory = five_step_trajectory(actions);
    let before = central.policy_params();

    let report = central
        .accumulate_gradients(&trajectory, 0)
        .unwrap();
    assert_eq!(report.steps, 5);
    assert!((report.entropy_weight - 1.0).abs() < 1e-6);
    assert!(report.critic_loss.is_some());
    assert_eq!(central.pending_gradients(), 1);

    // Accumulation itself must not move parameters.
    assert_eq!(central.policy_params(), before);

    let merged = central.apply_update();
    assert_eq!(merged, 1);
    assert_eq!(central.pending_gradients(), 0);
    assert_ne!(central.policy_params(), before);
}

#[test]
fn test_multiple_trajectories_merge_into_one_step() {
    let mut central = learner(ModelVariant::Original);

    let t1 = five_step_trajectory(vec![0, 1, 2, 1, 0]);
    let t2 = five_step_trajectory(vec![2, 2, 0, 1, 1]);

    central.accumulate_gradients(&t1, 0).unwrap();
    central.accumulate_gradients(&t2, 0).unwrap();
    assert_eq!(central.pending_gradients(), 2);

    assert_eq!(central.apply_update(), 2);
    assert_eq!(central.pending_gradients(), 0);
}

#[test]
fn test_apply_without_gradients_is_noop() {
    let mut central = learner(ModelVariant::Original);
    let before = central.policy_params();

    assert_eq!(central.apply_update(), 0);
    assert_eq!(central.policy_params(), before);
}

#[test]
fn test_discard_drops_pending_gradients() {
    let mut central = learner(ModelVariant::Original);
    let before = central.policy_params();

    central
        .accumulate_gradients(&five_step_trajectory(vec![0, 1, 2, 1, 0]), 0)
        .unwrap();
    central.discard_gradients();

    assert_eq!(central.pending_gradients(), 0);
    assert_eq!(central.apply_update(), 0);
    assert_eq!(central.policy_params(), before);
}

#[test]
fn test_critic_td_variant_trains() {
    let mut central = learner(ModelVariant::CriticTd);

    let report = central
        .accumulate_gradients(&five_step_trajectory(vec![0, 1, 2, 1, 0]), 1000)
        .unwrap();

    assert!(report.critic_loss.is_some());
    assert!(report.entropy_weight < 1.0);
    assert_eq!(central.apply_update(), 1);
}

#[test]
fn test_actor_only_variant_has_no_critic_loss() {
    let mut central = learner(ModelVariant::ActorOnly);

    let report = central
        .accumulate_gradients(&five_step_trajectory(vec![0, 1, 2, 1, 0]), 0)
        .unwrap();

    assert_eq!(report.critic_loss, None);
    assert_eq!(central.apply_update(), 1);
}

#[test]
fn test_entropy_weight_floors_late_in_training() {
    let mut central = learner(ModelVariant::Original);

    let report = central
        .accumulate_gradients(&five_step_trajectory(vec![0, 1, 2, 1, 0]), 10_000_000)
        .unwrap();

    assert!((report.entropy_weight - 0.1).abs() < 1e-6);
}

#[test]
fn test_critic_params_requires_critic() {
    let central = learner(ModelVariant::ActorOnly);
    assert_eq!(central.critic_params().unwrap_err(), AgentError::MissingCritic);

    let with_critic = learner(ModelVariant::Original);
    assert!(with_critic.critic_params().is_ok());
}

#[test]
fn test_construction_enforces_critic_ownership() {
    let device: <B as Backend>::Device = Default::default();

    let missing = CentralLearner::<B, _, TestValue<B>>::new(
        AgentConfig::new(4, 3).with_variant(ModelVariant::Original),
        TestPolicy::new(4, 3, &device),
        None,
        device.clone(),
    );
    assert_eq!(missing.err().unwrap(), AgentError::MissingCritic);

    let unexpected = CentralLearner::new(
        AgentConfig::new(4, 3).with_variant(ModelVariant::ActorOnly),
        TestPolicy::new(4, 3, &device),
        Some(TestValue::new(4, &device)),
        device,
    );
    assert_eq!(unexpected.err().unwrap(), AgentError::UnexpectedCritic);
}

#[test]
fn test_construction_enforces_network_shapes() {
    let device: <B as Backend>::Device = Default::default();

    let result = CentralLearner::new(
        AgentConfig::new(4, 3),
        TestPolicy::new(6, 3, &device),
        Some(TestValue::new(4, &device)),
        device,
    );

    assert!(matches!(
        result.err().unwrap(),
        AgentError::NetworkShape {
            what: "policy state_dim",
            ..
        }
    ));
}

#[test]
fn test_empty_trajectory_rejected() {
    let mut central = learner(ModelVariant::Original);
    let empty = Trajectory::new(4);

    assert_eq!(
        central.accumulate_gradients(&empty, 0).unwrap_err(),
        AgentError::EmptyTrajectory
    );
    assert_eq!(central.pending_gradients(), 0);
}

#[test]
fn test_single_step_rejected_under_critic_td() {
    let mut central = learner(ModelVariant::CriticTd);

    let mut single = Trajectory::new(4);
    single.push_step(&[0.0, 0.0, 0.0, 0.0], 0, 1.0).unwrap();
    single.set_terminal(true);

    assert_eq!(
        central.accumulate_gradients(&single, 0).unwrap_err(),
        AgentError::SingleStepTd
    );
    assert_eq!(central.pending_gradients(), 0);

    // The same trajectory is fine for the full-return variant.
    let mut original = learner(ModelVariant::Original);
    assert!(original.accumulate_gradients(&single, 0).is_ok());
}

#[test]
fn test_trajectory_shape_violations_accumulate_nothing() {
    let mut central = learner(ModelVariant::Original);

    let mut wrong_dim = Trajectory::new(3);
    wrong_dim.push_step(&[0.0, 0.0, 0.0], 0, 1.0).unwrap();
    assert!(matches!(
        central.accumulate_gradients(&wrong_dim, 0).unwrap_err(),
        AgentError::StateDimMismatch { expected: 4, actual: 3 }
    ));

    let mut bad_action = Trajectory::new(4);
    bad_action.push_step(&[0.0; 4], 7, 1.0).unwrap();
    assert_eq!(
        central.accumulate_gradients(&bad_action, 0).unwrap_err(),
        AgentError::ActionOutOfRange {
            action: 7,
            n_actions: 3,
        }
    );

    assert_eq!(central.pending_gradients(), 0);
}

#[test]
fn test_worker_hard_update_round_trip() {
    let mut worker = worker(1);

    let own = worker.policy_params();
    worker.hard_update(&own).unwrap();

    assert_eq!(worker.policy_params(), own);
}

#[test]
fn test_worker_rejects_mismatched_snapshot() {
    let device = Default::default();
    let mut small_worker = worker(1);
    let large_policy = TestPolicy::<InnerB>::new(8, 3, &device);
    let large_snapshot = crate::core::param_sync::snapshot_of::<InnerB, _>(&large_policy);

    let before = small_worker.policy_params();
    let err = small_worker.hard_update(&large_snapshot).unwrap_err();

    assert!(matches!(err, AgentError::Sync(_)));
    assert_eq!(small_worker.policy_params(), before);
}

#[test]
fn test_worker_rejects_wrong_state_len() {
    let mut worker = worker(1);

    assert_eq!(
        worker.select_action(&[0.0, 0.0]).unwrap_err(),
        AgentError::StateDimMismatch {
            expected: 4,
            actual: 2,
        }
    );
}

#[test]
fn test_workers_with_same_seed_and_params_agree() {
    let central = learner(ModelVariant::Original);
    let snapshot = central.policy_params();

    let mut worker_a = worker(123);
    let mut worker_b = worker(123);
    worker_a.hard_update(&snapshot).unwrap();
    worker_b.hard_update(&snapshot).unwrap();

    for step in 0..10 {
        let state = vec![step as f32, 0.0, 1.0, -1.0];
        let (action_a, probs_a) = worker_a.select_action(&state).unwrap();
        let (action_b, probs_b) = worker_b.select_action(&state).unwrap();
        assert_eq!(action_a, action_b);
        assert_eq!(probs_a, probs_b);
    }
}

#[test]
fn test_broadcast_reaches_multiple_workers() {
    let central = learner(ModelVariant::Original);
    let slot = ParamSlot::new();
    slot.publish(central.policy_params());

    let mut worker_a = worker(1);
    let mut worker_b = worker(2);

    let (snapshot_a, _) = slot.fetch().unwrap();
    let (snapshot_b, _) = slot.fetch().unwrap();
    worker_a.hard_update(&snapshot_a).unwrap();
    worker_b.hard_update(&snapshot_b).unwrap();

    assert_eq!(worker_a.policy_params(), worker_b.policy_params());
    assert_eq!(worker_a.policy_params(), central.policy_params());
}
