//! Force-directed layout engine.
//!
//! A continuous, alpha-driven simulation in the style of d3-force: each
//! [`Simulation::step`] lets alpha decay towards its target, accumulates
//! link, many-body and centering forces into node velocities, then
//! integrates positions. Stepping stops once alpha falls below the current
//! floor; [`Simulation::reheat`] wakes it again.
//!
//! The engine owns every node's position. Other components read positions
//! through [`Tick`] events and influence them only by pinning.

use std::f64::consts::PI;

use log::{info, warn};

use super::config::GraphConfig;
use super::types::{NodeId, SimEdge, SimGraph, SimNode};

/// Golden-angle increment used for the initial phyllotaxis placement.
const INITIAL_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);
const INITIAL_RADIUS: f64 = 10.0;
/// Squared distance below which many-body forces stop growing.
const DISTANCE_MIN2: f64 = 1.0;

/// Force and cooling parameters, taken from [`GraphConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
	pub center: (f64, f64),
	pub center_strength: f64,
	pub link_distance: f64,
	pub charge_strength: f64,
	pub alpha_floor: f64,
	pub alpha_decay: f64,
	pub velocity_decay: f64,
}

impl From<&GraphConfig> for SimulationParameters {
	fn from(config: &GraphConfig) -> Self {
		Self {
			center: (config.width / 2.0, config.height / 2.0),
			center_strength: config.center_strength,
			link_distance: config.link_distance,
			charge_strength: config.charge_strength,
			alpha_floor: config.alpha_floor_idle,
			alpha_decay: config.alpha_decay,
			velocity_decay: config.velocity_decay,
		}
	}
}

/// Emitted by every step that actually ran.
#[derive(Debug)]
pub struct Tick<'a> {
	pub alpha: f64,
	pub nodes: &'a [SimNode],
}

/// Linear congruential generator, for reproducible jiggle.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	const M: u64 = 4_294_967_296;

	fn next(&mut self) -> f64 {
		self.0 = (1_664_525 * self.0 + 1_013_904_223) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	/// Tiny random offset used to separate coincident points.
	fn jiggle(&mut self) -> f64 {
		(self.next() - 0.5) * 1e-6
	}
}

/// Per-edge spring constants, derived from endpoint degrees.
#[derive(Clone, Debug, Default)]
struct LinkForce {
	strengths: Vec<f64>,
	biases: Vec<f64>,
}

impl LinkForce {
	fn new(node_count: usize, edges: &[SimEdge]) -> Self {
		let mut degree = vec![0usize; node_count];
		for edge in edges {
			degree[edge.source.index()] += 1;
			degree[edge.target.index()] += 1;
		}
		let (strengths, biases) = edges
			.iter()
			.map(|edge| {
				let (s, t) = (degree[edge.source.index()] as f64, degree[edge.target.index()] as f64);
				(1.0 / s.min(t), s / (s + t))
			})
			.unzip();
		Self { strengths, biases }
	}
}

/// A running layout for one graph load.
#[derive(Debug)]
pub struct Simulation {
	nodes: Vec<SimNode>,
	edges: Vec<SimEdge>,
	params: SimulationParameters,
	link: LinkForce,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	random: Lcg,
}

impl Simulation {
	/// Places the nodes on a spiral around the center and starts stepping
	/// at full energy.
	pub fn start(graph: SimGraph, params: SimulationParameters) -> Self {
		let SimGraph { mut nodes, edges } = graph;
		let (cx, cy) = params.center;
		for (i, node) in nodes.iter_mut().enumerate() {
			let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
			let angle = i as f64 * INITIAL_ANGLE;
			node.x = cx + radius * angle.cos();
			node.y = cy + radius * angle.sin();
			node.vx = 0.0;
			node.vy = 0.0;
			if let Some(fx) = node.fx {
				node.x = fx;
			}
			if let Some(fy) = node.fy {
				node.y = fy;
			}
		}

		let edges: Vec<SimEdge> = edges
			.into_iter()
			.filter(|e| e.source.index() < nodes.len() && e.target.index() < nodes.len())
			.collect();
		let link = LinkForce::new(nodes.len(), &edges);

		Self {
			nodes,
			edges,
			params,
			link,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			random: Lcg(1),
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[SimEdge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&SimNode> {
		self.nodes.get(id.index())
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_floor(&self) -> f64 {
		self.params.alpha_floor
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Halts stepping without touching alpha.
	pub fn stop(&mut self) {
		self.running = false;
	}

	pub fn set_alpha_floor(&mut self, floor: f64) {
		self.params.alpha_floor = floor;
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Raises alpha to at least `target`, holds it there and resumes stepping.
	pub fn reheat(&mut self, target: f64) {
		self.alpha_target = target;
		self.alpha = self.alpha.max(target);
		self.running = true;
	}

	/// Fixes a node at `(x, y)` until [`Simulation::unpin`].
	pub fn pin(&mut self, id: NodeId, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(id.index()) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	/// Returns a node to free simulation from wherever it currently is.
	pub fn unpin(&mut self, id: NodeId) {
		if let Some(node) = self.nodes.get_mut(id.index()) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Advances one tick. Returns `None` once the engine has settled.
	pub fn step(&mut self) -> Option<Tick<'_>> {
		if !self.running {
			return None;
		}
		if self.alpha < self.params.alpha_floor {
			self.running = false;
			return None;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.apply_link_force();
		self.apply_many_body_force();
		self.apply_center_force();
		self.integrate();
		self.recover_non_finite();

		if self.alpha < self.params.alpha_floor {
			self.running = false;
			info!("force-network: layout settled at alpha {:.4}", self.alpha);
		}

		Some(Tick {
			alpha: self.alpha,
			nodes: &self.nodes,
		})
	}

	fn apply_link_force(&mut self) {
		let Self {
			nodes,
			edges,
			link,
			random,
			params,
			alpha,
			..
		} = self;

		for (i, edge) in edges.iter().enumerate() {
			let (s, t) = (edge.source.index(), edge.target.index());
			if s == t {
				continue;
			}
			let (source, target) = (&nodes[s], &nodes[t]);
			let mut dx = target.x + target.vx - source.x - source.vx;
			let mut dy = target.y + target.vy - source.y - source.vy;
			if dx == 0.0 {
				dx = random.jiggle();
			}
			if dy == 0.0 {
				dy = random.jiggle();
			}
			let distance = (dx * dx + dy * dy).sqrt();
			let l = (distance - params.link_distance) / distance * *alpha * link.strengths[i];
			dx *= l;
			dy *= l;

			let bias = link.biases[i];
			nodes[t].vx -= dx * bias;
			nodes[t].vy -= dy * bias;
			nodes[s].vx += dx * (1.0 - bias);
			nodes[s].vy += dy * (1.0 - bias);
		}
	}

	/// Exact pairwise repulsion; graphs here are small enough for O(n²).
	fn apply_many_body_force(&mut self) {
		let strength = self.params.charge_strength * self.alpha;
		if strength == 0.0 {
			return;
		}
		let positions: Vec<(f64, f64)> = self.nodes.iter().map(|n| (n.x, n.y)).collect();

		for (i, node) in self.nodes.iter_mut().enumerate() {
			for (j, &(ox, oy)) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let mut dx = ox - positions[i].0;
				let mut dy = oy - positions[i].1;
				let mut l = dx * dx + dy * dy;
				if dx == 0.0 {
					dx = self.random.jiggle();
					l += dx * dx;
				}
				if dy == 0.0 {
					dy = self.random.jiggle();
					l += dy * dy;
				}
				if l < DISTANCE_MIN2 {
					l = (DISTANCE_MIN2 * l).sqrt();
				}
				let w = strength / l;
				node.vx += dx * w;
				node.vy += dy * w;
			}
		}
	}

	fn apply_center_force(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (cx, cy) = self.params.center;
		let shift_x = (sx / n - cx) * self.params.center_strength;
		let shift_y = (sy / n - cy) * self.params.center_strength;
		for node in &mut self.nodes {
			node.x -= shift_x;
			node.y -= shift_y;
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.params.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= keep;
					node.y += node.vy;
				}
			}
		}
	}

	/// Puts nodes with NaN/infinite state back at the center instead of
	/// letting them poison every other force.
	fn recover_non_finite(&mut self) {
		let (cx, cy) = self.params.center;
		let mut reset = 0usize;
		for node in &mut self.nodes {
			if node.x.is_finite() && node.y.is_finite() && node.vx.is_finite() && node.vy.is_finite() {
				continue;
			}
			node.x = node.fx.filter(|v| v.is_finite()).unwrap_or(cx + self.random.jiggle());
			node.y = node.fy.filter(|v| v.is_finite()).unwrap_or(cy + self.random.jiggle());
			node.vx = 0.0;
			node.vy = 0.0;
			reset += 1;
		}
		if reset > 0 {
			warn!("force-network: reset {} node(s) with non-finite positions", reset);
		}
	}
}
