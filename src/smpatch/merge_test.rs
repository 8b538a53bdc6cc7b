//! Tests for strategic-merge semantics.

#[cfg(test)]
mod tests {
    use crate::smpatch::merge;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    /// Test case for merge operations.
    struct MergeTestCase {
        name: &'static str,
        triplets: Vec<MergeTriplet>,
    }

    struct MergeTriplet {
        target: &'static str,
        patch: &'static str,
        out: &'static str,
    }

    fn run_merge_test_case(tc: MergeTestCase) {
        for (i, triplet) in tc.triplets.iter().enumerate() {
            let mut target: Value = serde_yaml::from_str(triplet.target)
                .unwrap_or_else(|e| panic!("bad target for {}-{}: {}", tc.name, i, e));
            let patch: Value = serde_yaml::from_str(triplet.patch)
                .unwrap_or_else(|e| panic!("bad patch for {}-{}: {}", tc.name, i, e));
            let expected: Value = serde_yaml::from_str(triplet.out)
                .unwrap_or_else(|e| panic!("bad expectation for {}-{}: {}", tc.name, i, e));

            merge(&mut target, &patch);
            assert_eq!(
                target, expected,
                "merge mismatch for {}-{}.\npatch: {}",
                tc.name, i, triplet.patch
            );
        }
    }

    #[test]
    fn test_merge_scalars_and_maps() {
        run_merge_test_case(MergeTestCase {
            name: "scalars and maps",
            triplets: vec![
                MergeTriplet {
                    target: "a: 1\nb: old\n",
                    patch: "b: new\n",
                    out: "a: 1\nb: new\n",
                },
                MergeTriplet {
                    target: "outer:\n  kept: true\n  changed: 1\n",
                    patch: "outer:\n  changed: 2\n  added: x\n",
                    out: "outer:\n  kept: true\n  changed: 2\n  added: x\n",
                },
                MergeTriplet {
                    target: "a: {x: 1}\n",
                    patch: "a: scalar\n",
                    out: "a: scalar\n",
                },
            ],
        });
    }

    #[test]
    fn test_merge_null_deletes() {
        run_merge_test_case(MergeTestCase {
            name: "null deletes",
            triplets: vec![
                MergeTriplet {
                    target: "spec:\n  replicas: 3\n  paused: false\n",
                    patch: "spec:\n  replicas: null\n",
                    out: "spec:\n  paused: false\n",
                },
                MergeTriplet {
                    target: "a: 1\n",
                    patch: "missing: null\n",
                    out: "a: 1\n",
                },
                MergeTriplet {
                    // A map replacing a scalar must not carry deletion markers.
                    target: "a: scalar\n",
                    patch: "a:\n  keep: 1\n  drop: null\n",
                    out: "a:\n  keep: 1\n",
                },
            ],
        });
    }

    #[test]
    fn test_merge_lists_positionally() {
        run_merge_test_case(MergeTestCase {
            name: "positional lists",
            triplets: vec![
                MergeTriplet {
                    target: "args: [a, b, c]\n",
                    patch: "args: [x]\n",
                    out: "args: [x, b, c]\n",
                },
                MergeTriplet {
                    target: "args: [a]\n",
                    patch: "args: [x, y]\n",
                    out: "args: [x, y]\n",
                },
                MergeTriplet {
                    target: "items:\n- {a: 1, b: 2}\n",
                    patch: "items:\n- {b: 3}\n",
                    out: "items:\n- {a: 1, b: 3}\n",
                },
            ],
        });
    }

    #[test]
    fn test_merge_lists_by_name_key() {
        run_merge_test_case(MergeTestCase {
            name: "name-keyed lists",
            triplets: vec![
                MergeTriplet {
                    target: r#"
containers:
- name: app
  image: app:v1
- name: sidecar
  image: sidecar:v1
"#,
                    patch: r#"
containers:
- name: sidecar
  image: sidecar:v2
"#,
                    out: r#"
containers:
- name: app
  image: app:v1
- name: sidecar
  image: sidecar:v2
"#,
                },
                MergeTriplet {
                    target: "env:\n- name: A\n  value: '1'\n",
                    patch: "env:\n- name: B\n  value: '2'\n",
                    out: "env:\n- name: A\n  value: '1'\n- name: B\n  value: '2'\n",
                },
            ],
        });
    }

    #[test]
    fn test_merge_into_empty_target() {
        run_merge_test_case(MergeTestCase {
            name: "empty target",
            triplets: vec![MergeTriplet {
                target: "{}\n",
                patch: "spec:\n  replicas: 2\n",
                out: "spec:\n  replicas: 2\n",
            }],
        });
    }
}
