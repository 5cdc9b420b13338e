extern crate statekin_core;
extern crate nalgebra as na;
pub mod observables;
pub mod solver;

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use statekin_core::{ConfigurationError, EnergyUnit, ModelDescription, PhysicalParameters};
    use crate::observables::{conservation_drift, final_fractions, max_step_drift, total_population};
    use crate::solver::{GeneratorBuilder, KineticModel, TimeStamping, DEFAULT_SAVE_EVERY};

    /// Two states, barrier 10 kBT above both, prefactor chosen so that both rates are 1.
    fn two_state_description() -> ModelDescription {
        let mut description = ModelDescription::new(
            vec![1.0, 0.0],
            vec![0.0, 0.0],
            vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        );
        description.k0 = 10.0f64.exp();
        description.enzyme_conc = 1.0;
        description.dt = 0.01;
        description
    }

    fn three_state_description() -> ModelDescription {
        let mut description = ModelDescription::new(
            vec![0.5, 0.3, 0.2],
            vec![0.0, -1.0, 0.5],
            vec![
                vec![0.0, 6.0, 0.0],
                vec![6.0, 0.0, 4.0],
                vec![0.0, 4.0, 0.0],
            ],
        );
        description.k0 = 1000.0;
        description.enzyme_conc = 1.0;
        description.dt = 0.001;
        description
    }

    fn random_description(rng: &mut StdRng, number_states: usize) -> ModelDescription {
        let free_energies: Vec<f64> = (0..number_states).map(|_| rng.gen_range(-3.0..3.0)).collect();
        let transition_free_energies = (0..number_states)
            .map(|i| {
                (0..number_states)
                    .map(|j| {
                        if i == j || rng.gen_bool(0.3) {
                            0.0
                        } else {
                            3.0 + rng.gen_range(1.0..8.0)
                        }
                    })
                    .collect()
            })
            .collect();
        let initial_conc = (0..number_states).map(|_| rng.gen_range(0.0..1.0)).collect();
        let mut description = ModelDescription::new(initial_conc, free_energies, transition_free_energies);
        description.k0 = 100.0;
        description.enzyme_conc = 1.0;
        description.dt = 0.001;
        description
    }

    #[test]
    fn single_euler_step() {
        let mut model = KineticModel::new(&two_state_description()).expect("Can't build model");
        assert_eq!(format!("{:.8}", model.generator().rate(0, 1)), "1.00000000");
        assert_eq!(format!("{:.8}", model.generator().rate(0, 0)), "-1.00000000");
        model.advance(1, 1);
        let population = model.trajectory().last_population();
        assert_eq!(format!("{:.8}", population[0]), "0.99000000");
        assert_eq!(format!("{:.8}", population[1]), "0.01000000");
        assert_eq!(format!("{:.8}", model.trajectory().last_time()), "0.01000000");
        model.advance(1, 1);
        let population = model.trajectory().last_population();
        assert_eq!(format!("{:.8}", population[0]), "0.98020000");
        assert_eq!(format!("{:.8}", population[1]), "0.01980000");
    }

    #[test]
    fn folded_sub_steps_closed_form() {
        let mut model = KineticModel::new(&two_state_description()).expect("Can't build model");
        model.advance(1, 10);
        let population = model.trajectory().last_population();
        let expected = 0.5 + 0.5 * 0.98f64.powi(10);
        assert!((population[0] - expected).abs() < 1e-12);
        assert!((population[1] - (1.0 - expected)).abs() < 1e-12);
        model.advance(2, 10);
        let expected = 0.5 + 0.5 * 0.98f64.powi(30);
        assert!((model.trajectory().last_population()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn folded_sub_steps_match_single_steps() {
        for save_every in [2, 7, DEFAULT_SAVE_EVERY] {
            let mut folded = KineticModel::new(&three_state_description()).expect("Can't build model");
            folded.advance(1, save_every);
            let mut stepped = KineticModel::new(&three_state_description()).expect("Can't build model");
            for _ in 0..save_every {
                stepped.advance(1, 1);
            }
            assert_eq!(folded.trajectory().len(), 2);
            assert_eq!(stepped.trajectory().len(), save_every + 1);
            assert_eq!(folded.trajectory().last_population(), stepped.trajectory().last_population());
        }
    }

    #[test]
    fn two_state_equilibration() {
        let mut model = KineticModel::new(&two_state_description()).expect("Can't build model");
        model.advance_default(10);
        let early = (model.trajectory().last_population()[0] - 0.5).abs();
        model.advance_default(50);
        let late = (model.trajectory().last_population()[0] - 0.5).abs();
        assert!(late < early);
        assert!(late < 1e-4);
        let fractions = final_fractions(model.trajectory());
        assert!((fractions[0] - 0.5).abs() < 1e-4);
        assert!((fractions[1] - 0.5).abs() < 1e-4);
        let series = model.trajectory().state_series(0);
        for pair in series.windows(2) {
            assert!(pair[1] <= pair[0]);
            assert!(pair[1] >= 0.5);
        }
    }

    #[test]
    fn zero_row_sum() {
        let mut rng = StdRng::seed_from_u64(42);
        for number_states in 1..8 {
            let description = random_description(&mut rng, number_states);
            let model = KineticModel::new(&description).expect("Can't build model");
            let generator = model.generator();
            assert_eq!(generator.len(), number_states);
            for i in 0..number_states {
                let scale = generator.rate(i, i).abs().max(1.0);
                assert!(generator.row_sum(i).abs() <= 1e-12 * scale);
                for j in 0..number_states {
                    if i != j {
                        assert!(generator.rate(i, j) >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn no_path_sentinel() {
        let mut rng = StdRng::seed_from_u64(7);
        let description = random_description(&mut rng, 6);
        let model = KineticModel::new(&description).expect("Can't build model");
        let mut unconnected = 0;
        for i in 0..6 {
            for j in 0..6 {
                if i != j && description.transition_free_energies[i][j] == 0.0 {
                    assert_eq!(model.generator().rate(i, j), 0.0);
                    unconnected += 1;
                }
            }
        }
        assert!(unconnected > 0);
        for (from, to, rate) in model.generator().transitions() {
            assert_ne!(description.transition_free_energies[from][to], 0.0);
            assert!(rate > 0.0);
        }
    }

    #[test]
    fn three_state_rates() {
        let description = three_state_description();
        let model = KineticModel::new(&description).expect("Can't build model");
        let generator = model.generator();
        assert_eq!(format!("{:.8}", generator.rate(0, 1)), format!("{:.8}", 1000.0 * (-6.0f64).exp()));
        assert_eq!(format!("{:.8}", generator.rate(1, 0)), format!("{:.8}", 1000.0 * (-7.0f64).exp()));
        assert_eq!(format!("{:.8}", generator.rate(2, 1)), format!("{:.8}", 1000.0 * (-3.5f64).exp()));
        assert_eq!(generator.rate(0, 2), 0.0);
        assert_eq!(generator.rate(2, 0), 0.0);
        assert_eq!(format!("{:.8}", generator.fastest_rate()),
                   format!("{:.8}", 1000.0 * (-3.5f64).exp()));
        let rates = generator.rates();
        assert_eq!(rates[(1, 2)], generator.rate(1, 2));
        assert_eq!(generator.transitions().count(), 4);
    }

    #[test]
    fn unit_equivalence() {
        let thermal = three_state_description();
        let reference = KineticModel::new(&thermal).expect("Can't build model");
        for unit in [EnergyUnit::KiloJoulePerMole, EnergyUnit::ElectronVolt] {
            let mut converted = thermal.clone();
            converted.unit = unit.to_string();
            converted.free_energies = thermal.free_energies.iter()
                .map(|&energy| unit.from_thermal(energy, thermal.temperature))
                .collect();
            converted.transition_free_energies = thermal.transition_free_energies.iter()
                .map(|row| row.iter().map(|&energy| unit.from_thermal(energy, thermal.temperature)).collect())
                .collect();
            let model = KineticModel::new(&converted).expect("Can't build model");
            for i in 0..3 {
                for j in 0..3 {
                    let expected = reference.generator().rate(i, j);
                    let actual = model.generator().rate(i, j);
                    assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1e-12),
                            "{} rate ({}, {}) is {} instead of {}", unit, i, j, actual, expected);
                }
            }
        }
    }

    #[test]
    fn builder_gaps_in_thermal_units() {
        let free_energies = [0.0, 2.0];
        let transition_free_energies = vec![vec![0.0, 12.0], vec![12.0, 0.0]];
        let parameters = PhysicalParameters {
            unit: EnergyUnit::KiloJoulePerMole,
            ..PhysicalParameters::default()
        };
        let builder = GeneratorBuilder::new(&free_energies, &transition_free_energies, parameters);
        let gaps = builder.activation_gaps().expect("Can't compute gaps");
        assert_eq!(gaps[(0, 0)], 0.0);
        assert_eq!(gaps[(0, 1)], EnergyUnit::KiloJoulePerMole.to_thermal(12.0, 310.0));
        assert_eq!(gaps[(1, 0)], EnergyUnit::KiloJoulePerMole.to_thermal(10.0, 310.0));
        let broken = vec![vec![0.0, 12.0]];
        let builder = GeneratorBuilder::new(&free_energies, &broken, parameters);
        assert!(matches!(builder.build(), Err(ConfigurationError::ShapeMismatch { .. })));
    }

    #[test]
    fn mass_conservation() {
        let mut rng = StdRng::seed_from_u64(2024);
        for number_states in [2, 4, 7] {
            let description = random_description(&mut rng, number_states);
            let mut model = KineticModel::new(&description).expect("Can't build model");
            let initial = total_population(&model.trajectory().populations()[0]);
            model.advance(50, 20);
            assert!(max_step_drift(model.trajectory()) < 1e-12 * initial.max(1.0));
            assert!(conservation_drift(model.trajectory()) < 1e-10 * initial.max(1.0));
        }
    }

    #[test]
    fn trajectory_growth() {
        let mut model = KineticModel::new(&two_state_description()).expect("Can't build model");
        assert_eq!(model.time_stamping(), TimeStamping::Literal);
        model.advance(5, 10);
        assert_eq!(model.trajectory().len(), 6);
        model.advance(3, 4);
        assert_eq!(model.trajectory().len(), 9);
        let times = model.trajectory().times();
        for pair in times[..6].windows(2) {
            assert!((pair[1] - pair[0] - 0.01 * 5.0 * 10.0).abs() < 1e-12);
        }
        for pair in times[5..].windows(2) {
            assert!((pair[1] - pair[0] - 0.01 * 3.0 * 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn per_sample_time_stamping() {
        let mut model = KineticModel::new(&two_state_description())
            .expect("Can't build model")
            .with_time_stamping(TimeStamping::PerSample);
        model.advance(5, DEFAULT_SAVE_EVERY);
        let times = model.trajectory().times();
        for (i, time) in times.iter().enumerate() {
            assert!((time - 0.1 * i as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn warm_continuation() {
        let mut split = KineticModel::new(&two_state_description()).expect("Can't build model");
        split.advance(3, 10);
        split.advance(2, 10);
        let mut whole = KineticModel::new(&two_state_description()).expect("Can't build model");
        whole.advance(5, 10);
        assert_eq!(split.trajectory().populations(), whole.trajectory().populations());
        assert_eq!(format!("{:.8}", split.trajectory().last_time()), "1.30000000");
        assert_eq!(format!("{:.8}", whole.trajectory().last_time()), "2.50000000");
    }

    #[test]
    fn save_every_zero_does_one_iteration() {
        let mut zero = KineticModel::new(&two_state_description()).expect("Can't build model");
        zero.advance(2, 0);
        let mut one = KineticModel::new(&two_state_description()).expect("Can't build model");
        one.advance(2, 1);
        assert_eq!(zero.trajectory().populations(), one.trajectory().populations());
        assert_eq!(zero.trajectory().times(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn invalid_unit() {
        let mut description = two_state_description();
        description.unit = "foo".to_string();
        let model = KineticModel::new(&description);
        assert!(matches!(model, Err(ConfigurationError::UnknownUnit(unit)) if unit == "foo"));
    }

    #[test]
    fn labels_and_render_view() {
        let model = KineticModel::new(&three_state_description()).expect("Can't build model");
        assert_eq!(model.state_space().labels(), &["State0", "State1", "State2"]);
        let mut description = three_state_description();
        description.labels = Some(vec!["E".into(), "ES".into()]);
        assert!(matches!(KineticModel::new(&description),
                         Err(ConfigurationError::LabelCount { expected: 3, found: 2 })));
        description.labels = Some(vec!["E".into(), "ES".into(), "EP".into()]);
        let mut model = KineticModel::new(&description).expect("Can't build model");
        model.advance(4, 2);
        let view = model.render_view();
        assert_eq!(view.times.len(), 5);
        assert_eq!(view.series.len(), 3);
        assert_eq!(view.series[2].len(), 5);
        assert_eq!(view.labels[1], "ES");
        assert_eq!(view.series[0][0], 0.5);
    }
}
