//! Schema migrations
//!
//! Idempotent DDL, applied in one transaction. Every foreign key is
//! `ON DELETE RESTRICT`; constraint names are what the error mapping
//! matches on.

use sqlx::PgPool;

/// Tables in dependency order
pub const SCHEMA: &[(&str, &str)] = &[
    (
        "estado",
        r#"
        CREATE TABLE IF NOT EXISTS estado (
            id_estado SERIAL PRIMARY KEY,
            nome VARCHAR(30) NOT NULL CONSTRAINT estado_nome_key UNIQUE,
            sigla VARCHAR(2) NOT NULL CONSTRAINT estado_sigla_key UNIQUE
                CONSTRAINT estado_sigla_check CHECK (sigla ~ '^[A-Z]{2}$')
        )
        "#,
    ),
    (
        "cidade",
        r#"
        CREATE TABLE IF NOT EXISTS cidade (
            id_cidade SERIAL PRIMARY KEY,
            nome VARCHAR(100) NOT NULL,
            id_estado INTEGER NOT NULL REFERENCES estado(id_estado) ON DELETE RESTRICT,
            CONSTRAINT cidade_nome_estado_key UNIQUE (nome, id_estado)
        )
        "#,
    ),
    (
        "bairro",
        r#"
        CREATE TABLE IF NOT EXISTS bairro (
            id_bairro SERIAL PRIMARY KEY,
            nome VARCHAR(100) NOT NULL,
            id_cidade INTEGER NOT NULL REFERENCES cidade(id_cidade) ON DELETE RESTRICT,
            CONSTRAINT bairro_nome_cidade_key UNIQUE (nome, id_cidade)
        )
        "#,
    ),
    (
        "logradouro",
        r#"
        CREATE TABLE IF NOT EXISTS logradouro (
            id_logradouro SERIAL PRIMARY KEY,
            nome VARCHAR(150) NOT NULL,
            id_bairro INTEGER NOT NULL REFERENCES bairro(id_bairro) ON DELETE RESTRICT,
            CONSTRAINT logradouro_nome_bairro_key UNIQUE (nome, id_bairro)
        )
        "#,
    ),
    (
        "cep",
        r#"
        CREATE TABLE IF NOT EXISTS cep (
            id_cep SERIAL PRIMARY KEY,
            codigo VARCHAR(9) NOT NULL CONSTRAINT cep_codigo_key UNIQUE
                CONSTRAINT cep_codigo_check CHECK (codigo ~ '^[0-9]{5}-[0-9]{3}$'),
            id_logradouro INTEGER NOT NULL REFERENCES logradouro(id_logradouro) ON DELETE RESTRICT
        )
        "#,
    ),
    (
        "endereco",
        r#"
        CREATE TABLE IF NOT EXISTS endereco (
            id_endereco SERIAL PRIMARY KEY,
            id_logradouro INTEGER NOT NULL REFERENCES logradouro(id_logradouro) ON DELETE RESTRICT,
            numero INTEGER NOT NULL CONSTRAINT endereco_numero_check CHECK (numero >= 0),
            complemento VARCHAR(100),
            id_cep INTEGER NOT NULL REFERENCES cep(id_cep) ON DELETE RESTRICT
        )
        "#,
    ),
    (
        "usuario",
        r#"
        CREATE TABLE IF NOT EXISTS usuario (
            id_usuario SERIAL PRIMARY KEY,
            nome VARCHAR(150) NOT NULL,
            cpf VARCHAR(11) NOT NULL CONSTRAINT usuario_cpf_key UNIQUE,
            email VARCHAR(150) NOT NULL CONSTRAINT usuario_email_key UNIQUE,
            telefone VARCHAR(11),
            senha VARCHAR(255) NOT NULL,
            ativado BOOLEAN NOT NULL DEFAULT FALSE,
            desativado BOOLEAN NOT NULL DEFAULT FALSE,
            esqueceu_senha BOOLEAN NOT NULL DEFAULT FALSE,
            data_cadastro TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            id_endereco INTEGER REFERENCES endereco(id_endereco) ON DELETE RESTRICT
        )
        "#,
    ),
    (
        "hospedagem",
        r#"
        CREATE TABLE IF NOT EXISTS hospedagem (
            id_hospedagem SERIAL PRIMARY KEY,
            nome VARCHAR(150) NOT NULL,
            id_endereco INTEGER NOT NULL REFERENCES endereco(id_endereco) ON DELETE RESTRICT,
            CONSTRAINT hospedagem_nome_endereco_key UNIQUE (nome, id_endereco)
        )
        "#,
    ),
    (
        "servico",
        r#"
        CREATE TABLE IF NOT EXISTS servico (
            id_servico SERIAL PRIMARY KEY,
            id_hospedagem INTEGER NOT NULL REFERENCES hospedagem(id_hospedagem) ON DELETE RESTRICT,
            descricao VARCHAR(150) NOT NULL,
            preco NUMERIC(10, 2) NOT NULL CONSTRAINT servico_preco_check CHECK (preco >= 0),
            CONSTRAINT servico_descricao_hospedagem_key UNIQUE (descricao, id_hospedagem)
        )
        "#,
    ),
    (
        "status",
        r#"
        CREATE TABLE IF NOT EXISTS status (
            id_status SERIAL PRIMARY KEY,
            situacao VARCHAR(20) NOT NULL DEFAULT 'emAprovacao'
                CONSTRAINT status_situacao_check CHECK (situacao IN (
                    'emAprovacao', 'aprovado', 'negado', 'cancelado', 'emExecucao', 'concluido'
                )),
            atualizado_em TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "contrato",
        r#"
        CREATE TABLE IF NOT EXISTS contrato (
            id_contrato SERIAL PRIMARY KEY,
            id_hospedagem INTEGER NOT NULL REFERENCES hospedagem(id_hospedagem) ON DELETE RESTRICT,
            id_usuario INTEGER NOT NULL REFERENCES usuario(id_usuario) ON DELETE RESTRICT,
            id_status INTEGER NOT NULL REFERENCES status(id_status) ON DELETE RESTRICT,
            data_inicio DATE NOT NULL,
            data_fim DATE,
            CONSTRAINT contrato_data_fim_check CHECK (data_fim IS NULL OR data_fim >= data_inicio)
        )
        "#,
    ),
    (
        "contrato_servico",
        r#"
        CREATE TABLE IF NOT EXISTS contrato_servico (
            id_contrato_servico SERIAL PRIMARY KEY,
            id_contrato INTEGER NOT NULL REFERENCES contrato(id_contrato) ON DELETE RESTRICT,
            id_servico INTEGER NOT NULL REFERENCES servico(id_servico) ON DELETE RESTRICT,
            CONSTRAINT contrato_servico_key UNIQUE (id_contrato, id_servico)
        )
        "#,
    ),
    (
        "porte",
        r#"
        CREATE TABLE IF NOT EXISTS porte (
            id_porte SERIAL PRIMARY KEY,
            descricao VARCHAR(50) NOT NULL CONSTRAINT porte_descricao_key UNIQUE
        )
        "#,
    ),
    (
        "especie",
        r#"
        CREATE TABLE IF NOT EXISTS especie (
            id_especie SERIAL PRIMARY KEY,
            descricao VARCHAR(50) NOT NULL CONSTRAINT especie_descricao_key UNIQUE
        )
        "#,
    ),
    (
        "raca",
        r#"
        CREATE TABLE IF NOT EXISTS raca (
            id_raca SERIAL PRIMARY KEY,
            descricao VARCHAR(50) NOT NULL,
            id_especie INTEGER NOT NULL REFERENCES especie(id_especie) ON DELETE RESTRICT,
            CONSTRAINT raca_descricao_especie_key UNIQUE (descricao, id_especie)
        )
        "#,
    ),
    (
        "pet",
        r#"
        CREATE TABLE IF NOT EXISTS pet (
            id_pet SERIAL PRIMARY KEY,
            id_usuario INTEGER REFERENCES usuario(id_usuario) ON DELETE RESTRICT,
            id_porte INTEGER REFERENCES porte(id_porte) ON DELETE RESTRICT,
            id_especie INTEGER REFERENCES especie(id_especie) ON DELETE RESTRICT,
            id_raca INTEGER REFERENCES raca(id_raca) ON DELETE RESTRICT,
            nome VARCHAR(100),
            sexo CHAR(1) NOT NULL CONSTRAINT pet_sexo_check CHECK (sexo IN ('M', 'F')),
            nascimento DATE NOT NULL
        )
        "#,
    ),
];

/// Indexes applied after every table exists.
///
/// A missing `complemento` counts as empty so that the same street, number
/// and CEP cannot be registered twice. The table constraint of the same
/// name from earlier schemas treated NULLs as distinct and is dropped.
pub const INDEXES: &[(&str, &str)] = &[
    (
        "endereco",
        "ALTER TABLE endereco DROP CONSTRAINT IF EXISTS endereco_local_key",
    ),
    (
        "endereco",
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS endereco_local_key
            ON endereco (id_logradouro, numero, COALESCE(complemento, ''), id_cep)
        "#,
    ),
];

/// Apply the schema. Safe to run repeatedly.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running petfamily migrations...");

    let mut tx = pool.begin().await?;
    for (table, ddl) in SCHEMA {
        tracing::debug!(table, "ensuring table");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    for (table, ddl) in INDEXES {
        tracing::debug!(table, "ensuring index");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(tables = SCHEMA.len(), "Migrations complete");
    Ok(())
}
