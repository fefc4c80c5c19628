//! Contracts, their status rows and the services attached to them

use crate::models::{Consistency, Dependent, Field, FieldKind, Filter, FilterOp, Noun, ResourceSpec};

use super::lodging::{LODGING, SERVICE};
use super::user::USER;

/// Status rows are written through [`crate::db::StatusRepo`]; this spec only
/// drives reads and deletes, so it declares no writable fields.
///
/// The six flags are derived from `situacao`, which keeps exactly one of
/// them true.
pub static STATUS: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Status",
        plural: "Status",
        feminine: false,
    },
    path: "/status",
    table: "status",
    key: "id_status",
    id_alias: "idStatus",
    fields: &[],
    required_message: "",
    select: r#"SELECT s.id_status AS "idStatus", s.situacao AS "situacao",
            s.situacao = 'emAprovacao' AS "emAprovacao",
            s.situacao = 'aprovado' AS "aprovado",
            s.situacao = 'negado' AS "negado",
            s.situacao = 'cancelado' AS "cancelado",
            s.situacao = 'emExecucao' AS "emExecucao",
            s.situacao = 'concluido' AS "concluido",
            s.atualizado_em AS "atualizadoEm"
        FROM status s"#,
    order_by: &["idStatus"],
    filters: &[Filter {
        param: "situacao",
        alias: "situacao",
        op: FilterOp::Exact,
    }],
    conflicts: &[],
    conflict_message: "Status já cadastrado",
    dependents: &[Dependent {
        table: "contrato",
        column: "id_status",
    }],
    in_use_message: "Não é possível excluir o status pois está vinculado a contratos",
    checks: &[],
};

pub static CONTRACT: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Contrato",
        plural: "Contratos",
        feminine: false,
    },
    path: "/contrato",
    table: "contrato",
    key: "id_contrato",
    id_alias: "idContrato",
    fields: &[
        Field::new("idHospedagem", "id_hospedagem", FieldKind::Id)
            .required()
            .references(&LODGING),
        Field::new("idUsuario", "id_usuario", FieldKind::Id)
            .required()
            .references(&USER),
        Field::new("idStatus", "id_status", FieldKind::Id)
            .required()
            .references(&STATUS),
        Field::new("dataInicio", "data_inicio", FieldKind::Date { allow_future: true }).required(),
        Field::new("dataFim", "data_fim", FieldKind::Date { allow_future: true }),
    ],
    required_message: "idHospedagem, idUsuario, idStatus e dataInicio são obrigatórios",
    select: r#"SELECT ct.id_contrato AS "idContrato", ct.id_hospedagem AS "idHospedagem",
            ct.id_usuario AS "idUsuario", ct.id_status AS "idStatus",
            ct.data_inicio AS "dataInicio", ct.data_fim AS "dataFim",
            h.nome AS "hospedagem", u.nome AS "usuario", s.situacao AS "situacao"
        FROM contrato ct
        JOIN hospedagem h ON h.id_hospedagem = ct.id_hospedagem
        JOIN usuario u ON u.id_usuario = ct.id_usuario
        JOIN status s ON s.id_status = ct.id_status"#,
    order_by: &["idContrato"],
    filters: &[
        Filter {
            param: "idUsuario",
            alias: "idUsuario",
            op: FilterOp::Id,
        },
        Filter {
            param: "idHospedagem",
            alias: "idHospedagem",
            op: FilterOp::Id,
        },
        Filter {
            param: "idStatus",
            alias: "idStatus",
            op: FilterOp::Id,
        },
    ],
    conflicts: &[],
    conflict_message: "Contrato já cadastrado",
    dependents: &[Dependent {
        table: "contrato_servico",
        column: "id_contrato",
    }],
    in_use_message: "Não é possível excluir o contrato pois existem serviços vinculados a ele",
    checks: &[
        Consistency::DateOrder {
            start: "dataInicio",
            end: "dataFim",
            message: "Data fim não pode ser anterior à data início",
        },
        Consistency::KeepsDependents {
            field: "idHospedagem",
            mismatch: "SELECT 1 FROM contrato_servico cs \
                JOIN servico s ON s.id_servico = cs.id_servico \
                WHERE cs.id_contrato = $1 AND s.id_hospedagem <> $2",
            message: "O contrato possui serviços de outra hospedagem",
        },
    ],
};

pub static CONTRACT_SERVICE: ResourceSpec = ResourceSpec {
    noun: Noun {
        singular: "Serviço do contrato",
        plural: "Serviços do contrato",
        feminine: false,
    },
    path: "/contratoservico",
    table: "contrato_servico",
    key: "id_contrato_servico",
    id_alias: "idContratoServico",
    fields: &[
        Field::new("idContrato", "id_contrato", FieldKind::Id)
            .required()
            .references(&CONTRACT),
        Field::new("idServico", "id_servico", FieldKind::Id)
            .required()
            .references(&SERVICE),
    ],
    required_message: "idContrato e idServico são obrigatórios",
    select: r#"SELECT cs.id_contrato_servico AS "idContratoServico",
            cs.id_contrato AS "idContrato", cs.id_servico AS "idServico",
            sv.descricao AS "servico", sv.preco AS "preco", h.nome AS "hospedagem"
        FROM contrato_servico cs
        JOIN servico sv ON sv.id_servico = cs.id_servico
        JOIN hospedagem h ON h.id_hospedagem = sv.id_hospedagem"#,
    order_by: &["idContratoServico"],
    filters: &[Filter {
        param: "idContrato",
        alias: "idContrato",
        op: FilterOp::Id,
    }],
    conflicts: &[],
    conflict_message: "Este serviço já está vinculado ao contrato",
    dependents: &[],
    in_use_message: "",
    checks: &[Consistency::SameParent {
        left: "idServico",
        left_table: "servico",
        left_key: "id_servico",
        right: "idContrato",
        right_table: "contrato",
        right_key: "id_contrato",
        column: "id_hospedagem",
        message: "O serviço não pertence à hospedagem do contrato",
    }],
};
