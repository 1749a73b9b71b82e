// src/services/status_rules.rs
//
// As regras puras do motor de status. Nada de I/O aqui: o licence_service
// carrega as linhas, chama estas funções e persiste o resultado dentro da
// transação. Manter puro é o que deixa a tabela de efeitos testável de ponta
// a ponta sem banco.

use crate::models::clients::Status;

/// Operação de contador a aplicar num cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    /// count_licence += 1 e status = Active.
    Grant,
    /// count_licence -= 1 (piso em zero) e, se chegar a 0, status = Inactive.
    Release,
}

/// Efeitos de um edit de licença sobre os clientes envolvidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditEffects {
    pub old_client: Option<CounterOp>,
    pub new_client: Option<CounterOp>,
    /// Só no caso "mesmo cliente, status mudou" uma linha de History nasce.
    pub log_transition: bool,
}

impl EditEffects {
    /// Materializa os efeitos como pares (client_id, op), sempre em ordem
    /// crescente de id. Dois re-parents simultâneos em sentidos opostos
    /// travam as mesmas duas linhas; a ordem canônica impede o deadlock.
    pub fn ops(&self, old_client_id: i32, new_client_id: i32) -> Vec<(i32, CounterOp)> {
        let mut ops = Vec::with_capacity(2);
        if let Some(op) = self.old_client {
            ops.push((old_client_id, op));
        }
        if let Some(op) = self.new_client {
            ops.push((new_client_id, op));
        }
        ops.sort_by_key(|(id, _)| *id);
        ops
    }
}

/// Criação: licença ativa concede ao cliente dono; inativa não toca em nada.
/// Nunca gera History (criação não é transição).
pub fn on_create(status: Status) -> Option<CounterOp> {
    match status {
        Status::Active => Some(CounterOp::Grant),
        Status::Inactive => None,
    }
}

/// Edição: compara (cliente, status) antes e depois.
///
/// | mesmo cliente | mesmo status | efeito                                        |
/// |---------------|--------------|-----------------------------------------------|
/// | sim           | sim          | nada                                          |
/// | sim           | não          | History; Active => grant, Inactive => release |
/// | não           | não          | Active => grant(novo); Inactive => release(velho). Sem History |
/// | não           | sim          | Active => grant(novo) + release(velho); Inactive => nada. Sem History |
///
/// A assimetria é intencional: re-apontar cliente nunca gera History,
/// mesmo quando o status muda junto.
pub fn on_edit(
    prev_client: i32,
    prev_status: Status,
    next_client: i32,
    next_status: Status,
) -> EditEffects {
    let same_client = prev_client == next_client;
    let same_status = prev_status == next_status;

    match (same_client, same_status) {
        (true, true) => EditEffects::default(),

        (true, false) => EditEffects {
            old_client: None,
            new_client: Some(match next_status {
                Status::Active => CounterOp::Grant,
                Status::Inactive => CounterOp::Release,
            }),
            log_transition: true,
        },

        (false, false) => match next_status {
            Status::Active => EditEffects {
                old_client: None,
                new_client: Some(CounterOp::Grant),
                log_transition: false,
            },
            Status::Inactive => EditEffects {
                old_client: Some(CounterOp::Release),
                new_client: None,
                log_transition: false,
            },
        },

        (false, true) => match next_status {
            Status::Active => EditEffects {
                old_client: Some(CounterOp::Release),
                new_client: Some(CounterOp::Grant),
                log_transition: false,
            },
            Status::Inactive => EditEffects::default(),
        },
    }
}

/// Remoção: licença ativa devolve a cota ao cliente; inativa não. Sem History.
pub fn on_delete(status: Status) -> Option<CounterOp> {
    match status {
        Status::Active => Some(CounterOp::Release),
        Status::Inactive => None,
    }
}

/// Aplica uma operação de contador ao par derivado (count_licence, status).
///
/// Release tem piso em zero: o decremento é pulado com count == 0, mas o
/// teste de zero roda mesmo assim, então o status (re)assenta em Inactive.
pub fn apply(op: CounterOp, count_licence: i32, status: Status) -> (i32, Status) {
    match op {
        CounterOp::Grant => (count_licence + 1, Status::Active),
        CounterOp::Release => {
            let count = if count_licence != 0 {
                count_licence - 1
            } else {
                count_licence
            };
            let status = if count == 0 { Status::Inactive } else { status };
            (count, status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clients::Status::{Active, Inactive};

    // --- criação / remoção ---

    #[test]
    fn create_active_grants_create_inactive_does_nothing() {
        assert_eq!(on_create(Active), Some(CounterOp::Grant));
        assert_eq!(on_create(Inactive), None);
    }

    #[test]
    fn delete_active_releases_delete_inactive_does_nothing() {
        assert_eq!(on_delete(Active), Some(CounterOp::Release));
        assert_eq!(on_delete(Inactive), None);
    }

    // --- a tabela de edição, linha por linha ---

    #[test]
    fn same_client_same_status_is_a_noop() {
        assert_eq!(on_edit(1, Active, 1, Active), EditEffects::default());
        assert_eq!(on_edit(1, Inactive, 1, Inactive), EditEffects::default());
    }

    #[test]
    fn same_client_status_flip_logs_and_adjusts() {
        let up = on_edit(1, Inactive, 1, Active);
        assert_eq!(up.new_client, Some(CounterOp::Grant));
        assert_eq!(up.old_client, None);
        assert!(up.log_transition);

        let down = on_edit(1, Active, 1, Inactive);
        assert_eq!(down.new_client, Some(CounterOp::Release));
        assert_eq!(down.old_client, None);
        assert!(down.log_transition);
    }

    #[test]
    fn reparent_with_status_flip_touches_one_side_only_no_history() {
        // Vira ativa no cliente novo: só o novo ganha.
        let up = on_edit(1, Inactive, 2, Active);
        assert_eq!(up.new_client, Some(CounterOp::Grant));
        assert_eq!(up.old_client, None);
        assert!(!up.log_transition);

        // Vira inativa: só o velho devolve.
        let down = on_edit(1, Active, 2, Inactive);
        assert_eq!(down.old_client, Some(CounterOp::Release));
        assert_eq!(down.new_client, None);
        assert!(!down.log_transition);
    }

    #[test]
    fn reparent_active_moves_the_grant_no_history() {
        let fx = on_edit(1, Active, 2, Active);
        assert_eq!(fx.old_client, Some(CounterOp::Release));
        assert_eq!(fx.new_client, Some(CounterOp::Grant));
        assert!(!fx.log_transition);
    }

    #[test]
    fn reparent_inactive_is_a_noop() {
        assert_eq!(on_edit(1, Inactive, 2, Inactive), EditEffects::default());
    }

    // --- ordem canônica de travamento ---

    #[test]
    fn ops_come_out_in_ascending_client_id_order() {
        // Re-parent ativo nos dois sentidos: a ordem dos locks é a mesma.
        let forward = on_edit(1, Active, 2, Active).ops(1, 2);
        assert_eq!(
            forward,
            vec![(1, CounterOp::Release), (2, CounterOp::Grant)]
        );

        let backward = on_edit(2, Active, 1, Active).ops(2, 1);
        assert_eq!(
            backward,
            vec![(1, CounterOp::Grant), (2, CounterOp::Release)]
        );
    }

    #[test]
    fn ops_of_a_single_sided_edit_touch_one_client() {
        let flip = on_edit(7, Inactive, 7, Active).ops(7, 7);
        assert_eq!(flip, vec![(7, CounterOp::Grant)]);

        assert!(on_edit(1, Inactive, 1, Inactive).ops(1, 1).is_empty());
    }

    // --- o aplicador e o piso em zero ---

    #[test]
    fn grant_activates_from_zero() {
        assert_eq!(apply(CounterOp::Grant, 0, Inactive), (1, Active));
    }

    #[test]
    fn grant_increments_an_active_client() {
        assert_eq!(apply(CounterOp::Grant, 3, Active), (4, Active));
    }

    #[test]
    fn release_deactivates_at_zero_crossing() {
        assert_eq!(apply(CounterOp::Release, 1, Active), (0, Inactive));
    }

    #[test]
    fn release_keeps_active_above_zero() {
        assert_eq!(apply(CounterOp::Release, 2, Active), (1, Active));
    }

    #[test]
    fn release_never_goes_negative() {
        assert_eq!(apply(CounterOp::Release, 0, Inactive), (0, Inactive));
        // Com o contador já em zero o status reassenta em Inactive:
        // o guard protege só o decremento, o teste de zero roda sempre.
        assert_eq!(apply(CounterOp::Release, 0, Active), (0, Inactive));
    }

    #[test]
    fn status_follows_count_invariant_under_any_op_sequence() {
        let mut state = (0, Inactive);
        let ops = [
            CounterOp::Grant,
            CounterOp::Grant,
            CounterOp::Release,
            CounterOp::Release,
            CounterOp::Release, // piso
            CounterOp::Grant,
        ];
        for op in ops {
            state = apply(op, state.0, state.1);
            assert!(state.0 >= 0);
            assert_eq!(state.1 == Active, state.0 > 0);
        }
    }

    // O cenário de referência: cliente com duas licenças ativas apagando
    // uma de cada vez, em edição no mesmo cliente.
    #[test]
    fn two_licence_winddown_scenario() {
        let mut count = 2;
        let mut status = Active;

        // L1: active -> inactive (mesmo cliente) gera History + release.
        let fx1 = on_edit(10, Active, 10, Inactive);
        assert!(fx1.log_transition);
        let (c, s) = apply(fx1.new_client.unwrap(), count, status);
        count = c;
        status = s;
        assert_eq!((count, status), (1, Active));

        // L2: idem; o cliente cruza o zero e desativa.
        let fx2 = on_edit(10, Active, 10, Inactive);
        assert!(fx2.log_transition);
        let (c, s) = apply(fx2.new_client.unwrap(), count, status);
        assert_eq!((c, s), (0, Inactive));
    }
}
